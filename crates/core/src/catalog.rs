//! Piece catalog - the seven shapes and their four orientations
//!
//! Each shape is written down once, in its spawn ("normal") orientation, as a
//! handful of occupied cells inside a small matrix. The other three
//! orientations are derived from it by matrix rotation when the catalog is
//! built and never change afterwards.
//!
//! Rotation rules for an `R x C` matrix:
//! - `Right`: 90° clockwise, result is `C x R`, `out[c][R-1-r] = in[r][c]`
//! - `Mirrored`: 180°, `out[R-1-r][C-1-c] = in[r][c]`
//! - `Left`: 90° counter-clockwise, result is `C x R`, `out[C-1-c][r] = in[r][c]`
//!
//! The square is not rotatable: all four entries are copies of the canonical
//! matrix.

use crate::rng::SimpleRng;
use crate::types::{Block, Cell, Color, Rotation, ShapeKind, SHAPE_COUNT};

/// Largest side of any shape matrix
pub const MAX_SIDE: usize = 4;

/// Occupancy matrix of a shape in one orientation.
///
/// Stored with a fixed stride of [`MAX_SIDE`] so it stays `Copy` and
/// allocation-free; cells outside `rows x cols` are always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: u8,
    cols: u8,
    cells: [Cell; MAX_SIDE * MAX_SIDE],
}

impl Matrix {
    /// Create an empty `rows x cols` matrix
    pub fn empty(rows: usize, cols: usize) -> Self {
        assert!(
            (1..=MAX_SIDE).contains(&rows) && (1..=MAX_SIDE).contains(&cols),
            "shape matrix must be between 1x1 and {}x{}, got {}x{}",
            MAX_SIDE,
            MAX_SIDE,
            rows,
            cols
        );
        Self {
            rows: rows as u8,
            cols: cols as u8,
            cells: [None; MAX_SIDE * MAX_SIDE],
        }
    }

    /// Create a matrix with `block` at each `(row, column)` offset
    pub fn from_offsets(rows: usize, cols: usize, offsets: &[(u8, u8)], block: Block) -> Self {
        let mut matrix = Self::empty(rows, cols);
        for &(row, col) in offsets {
            matrix.set(row as usize, col as usize, Some(block));
        }
        matrix
    }

    #[inline(always)]
    fn index(row: usize, col: usize) -> usize {
        row * MAX_SIDE + col
    }

    /// Number of rows (height)
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of columns (width)
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Cell at (row, col); empty when out of range
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row >= self.rows as usize || col >= self.cols as usize {
            return None;
        }
        self.cells[Self::index(row, col)]
    }

    /// Set cell at (row, col)
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        assert!(
            row < self.rows as usize && col < self.cols as usize,
            "({row}, {col}) outside {}x{} matrix",
            self.rows,
            self.cols
        );
        self.cells[Self::index(row, col)] = cell;
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    /// Occupied cells as `(row, col, block)`, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (u8, u8, Block)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).filter_map(move |col| {
                self.cells[Self::index(row as usize, col as usize)].map(|block| (row, col, block))
            })
        })
    }

    /// Return this matrix turned into `rotation`, relative to itself
    pub fn rotated(&self, rotation: Rotation) -> Self {
        rotate_shape(self, rotation)
    }
}

/// Turn a matrix into the given orientation.
///
/// `Normal` returns an unchanged copy.
pub fn rotate_shape(matrix: &Matrix, rotation: Rotation) -> Matrix {
    let rows = matrix.rows as usize;
    let cols = matrix.cols as usize;

    match rotation {
        Rotation::Normal => *matrix,
        Rotation::Mirrored => {
            let mut out = Matrix::empty(rows, cols);
            for r in 0..rows {
                for c in 0..cols {
                    out.set(rows - 1 - r, cols - 1 - c, matrix.get(r, c));
                }
            }
            out
        }
        Rotation::Right => {
            let mut out = Matrix::empty(cols, rows);
            for r in 0..rows {
                for c in 0..cols {
                    out.set(c, rows - 1 - r, matrix.get(r, c));
                }
            }
            out
        }
        Rotation::Left => {
            let mut out = Matrix::empty(cols, rows);
            for r in 0..rows {
                for c in 0..cols {
                    out.set(cols - 1 - c, r, matrix.get(r, c));
                }
            }
            out
        }
    }
}

/// The four orientations of one shape, indexed by [`Rotation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationTable {
    matrices: [Matrix; 4],
}

impl RotationTable {
    pub fn get(&self, rotation: Rotation) -> &Matrix {
        &self.matrices[rotation.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rotation, &Matrix)> {
        Rotation::ALL.into_iter().zip(self.matrices.iter())
    }
}

/// Derive all four orientations from the canonical one
pub fn generate_shape_list(canonical: Matrix, non_rotatable: bool) -> RotationTable {
    let matrices = Rotation::ALL.map(|rotation| {
        if non_rotatable {
            canonical
        } else {
            rotate_shape(&canonical, rotation)
        }
    });
    RotationTable { matrices }
}

/// Canonical layout of a shape: (rows, cols, occupied (row, col) offsets)
pub fn canonical_layout(kind: ShapeKind) -> (usize, usize, [(u8, u8); 4]) {
    match kind {
        // #
        // #
        // #
        // #
        ShapeKind::Line => (4, 1, [(0, 0), (1, 0), (2, 0), (3, 0)]),
        // .#
        // .#
        // ##
        ShapeKind::LLeft => (3, 2, [(0, 1), (1, 1), (2, 1), (2, 0)]),
        // #.
        // #.
        // ##
        ShapeKind::LRight => (3, 2, [(0, 0), (1, 0), (2, 0), (2, 1)]),
        // .#.
        // ###
        ShapeKind::TTurned => (2, 3, [(0, 1), (1, 0), (1, 1), (1, 2)]),
        // ##
        // ##
        ShapeKind::Square => (2, 2, [(0, 0), (0, 1), (1, 0), (1, 1)]),
        // .##
        // ##.
        ShapeKind::ZLeft => (2, 3, [(0, 1), (0, 2), (1, 0), (1, 1)]),
        // ##.
        // .##
        ShapeKind::ZRight => (2, 3, [(0, 0), (0, 1), (1, 1), (1, 2)]),
    }
}

/// A shape with its precomputed orientations and its color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    kind: ShapeKind,
    block: Block,
    rotations: RotationTable,
}

impl Shape {
    /// Build a shape whose cells all share `block`
    pub fn new(kind: ShapeKind, block: Block) -> Self {
        let (rows, cols, offsets) = canonical_layout(kind);
        let canonical = Matrix::from_offsets(rows, cols, &offsets, block);
        Self {
            kind,
            block,
            rotations: generate_shape_list(canonical, !kind.is_rotatable()),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.block.color
    }

    pub fn is_rotatable(&self) -> bool {
        self.kind.is_rotatable()
    }

    /// Matrix for the given orientation
    pub fn matrix(&self, rotation: Rotation) -> &Matrix {
        self.rotations.get(rotation)
    }

    pub fn rotations(&self) -> &RotationTable {
        &self.rotations
    }

    /// Bounding-box width in the given orientation
    pub fn width(&self, rotation: Rotation) -> u8 {
        self.matrix(rotation).cols()
    }

    /// Bounding-box height in the given orientation
    pub fn height(&self, rotation: Rotation) -> u8 {
        self.matrix(rotation).rows()
    }
}

/// All seven shapes, built once and then read-only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    shapes: [Shape; SHAPE_COUNT],
}

impl Catalog {
    /// Build the catalog, giving each shape one random color
    pub fn new(rng: &mut SimpleRng) -> Self {
        Self {
            shapes: ShapeKind::ALL.map(|kind| Shape::new(kind, Block::new(rng.next_color()))),
        }
    }

    /// Build the catalog with one fixed color per shape
    pub fn with_colors(colors: [Color; SHAPE_COUNT]) -> Self {
        Self {
            shapes: ShapeKind::ALL.map(|kind| Shape::new(kind, Block::new(colors[kind.index()]))),
        }
    }

    pub fn shape(&self, kind: ShapeKind) -> &Shape {
        &self.shapes[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Block = Block::new(Color::new(255, 0, 0));

    fn occupancy(matrix: &Matrix) -> Vec<String> {
        (0..matrix.rows() as usize)
            .map(|r| {
                (0..matrix.cols() as usize)
                    .map(|c| if matrix.is_occupied(r, c) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_matrix_get_out_of_range_is_empty() {
        let m = Matrix::from_offsets(2, 3, &[(1, 2)], RED);
        assert_eq!(m.get(1, 2), Some(RED));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
    }

    #[test]
    #[should_panic]
    fn test_matrix_too_large_panics() {
        let _ = Matrix::empty(5, 1);
    }

    #[test]
    fn test_rotate_right_t() {
        let (rows, cols, offsets) = canonical_layout(ShapeKind::TTurned);
        let t = Matrix::from_offsets(rows, cols, &offsets, RED);

        assert_eq!(occupancy(&rotate_shape(&t, Rotation::Right)), ["#.", "##", "#."]);
        assert_eq!(occupancy(&rotate_shape(&t, Rotation::Mirrored)), ["###", ".#."]);
        assert_eq!(occupancy(&rotate_shape(&t, Rotation::Left)), [".#", "##", ".#"]);
    }

    #[test]
    fn test_rotate_line_transposes() {
        let (rows, cols, offsets) = canonical_layout(ShapeKind::Line);
        let line = Matrix::from_offsets(rows, cols, &offsets, RED);

        let right = rotate_shape(&line, Rotation::Right);
        assert_eq!((right.rows(), right.cols()), (1, 4));
        assert_eq!(occupancy(&right), ["####"]);
    }

    #[test]
    fn test_rotate_lleft_right() {
        let (rows, cols, offsets) = canonical_layout(ShapeKind::LLeft);
        let l = Matrix::from_offsets(rows, cols, &offsets, RED);

        assert_eq!(occupancy(&l), [".#", ".#", "##"]);
        assert_eq!(occupancy(&rotate_shape(&l, Rotation::Right)), ["#..", "###"]);
    }

    #[test]
    fn test_square_table_is_constant() {
        let square = Shape::new(ShapeKind::Square, RED);
        let normal = *square.matrix(Rotation::Normal);
        for (_, m) in square.rotations().iter() {
            assert_eq!(*m, normal);
        }
    }

    #[test]
    fn test_shape_shares_one_block() {
        let catalog = Catalog::new(&mut SimpleRng::new(9));
        for shape in catalog.iter() {
            for (_, m) in shape.rotations().iter() {
                assert!(m.occupied().all(|(_, _, b)| b.color == shape.color()));
                assert_eq!(m.occupied().count(), 4);
            }
        }
    }

    #[test]
    fn test_catalog_order() {
        let catalog = Catalog::new(&mut SimpleRng::new(1));
        for kind in ShapeKind::ALL {
            assert_eq!(catalog.shape(kind).kind(), kind);
        }
    }
}
