//! Grid module - the field of locked blocks
//!
//! The grid is 10 columns x 20 lines. Only blocks of pieces that already
//! landed live here; the falling piece is kept separately by the board.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::error::GridError;
use crate::types::{Block, Cell, Color, COLUMNS, LINES};

/// Total number of cells on the grid
const GRID_SIZE: usize = (COLUMNS as usize) * (LINES as usize);

/// Block used for `#` cells in [`Grid::from_ascii`]
pub const ASCII_BLOCK: Block = Block::new(Color::new(0x80, 0x80, 0x80));

/// Row indices removed by one line-clear pass, top to bottom
pub type ClearedRows = ArrayVec<usize, { LINES as usize }>;

/// True iff no cell in the row is empty
pub fn is_full(row: &[Cell]) -> bool {
    row.iter().all(|cell| cell.is_some())
}

/// True iff every cell in the row is empty
pub fn is_empty(row: &[Cell]) -> bool {
    row.iter().all(|cell| cell.is_none())
}

/// The playing field - 10 columns x 20 lines using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * COLUMNS + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Build a grid from rows of cells. Rows are bottom-aligned: fewer than
    /// 20 rows leave the top of the grid empty.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self, GridError> {
        let height = LINES as usize;
        let width = COLUMNS as usize;
        if rows.len() > height {
            return Err(GridError::TooManyRows {
                found: rows.len(),
                max: height,
            });
        }

        let mut grid = Self::new();
        let offset = height - rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RowWidth {
                    row: i,
                    found: row.len(),
                    expected: width,
                });
            }
            let start = (offset + i) * width;
            grid.cells[start..start + width].copy_from_slice(row);
        }
        Ok(grid)
    }

    /// Build a grid from text rows, `#` = occupied, `.` = empty.
    /// Rows are bottom-aligned like [`Grid::from_rows`].
    pub fn from_ascii(lines: &[&str]) -> Result<Self, GridError> {
        let mut rows = Vec::with_capacity(lines.len());
        for (row, line) in lines.iter().enumerate() {
            let mut cells = Vec::with_capacity(COLUMNS as usize);
            for (column, ch) in line.chars().enumerate() {
                match ch {
                    '#' => cells.push(Some(ASCII_BLOCK)),
                    '.' => cells.push(None),
                    found => {
                        return Err(GridError::UnknownCell { row, column, found });
                    }
                }
            }
            rows.push(cells);
        }
        Self::from_rows(&rows)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= COLUMNS as i8 || y < 0 || y >= LINES as i8 {
            return None;
        }
        Some((y as usize) * (COLUMNS as usize) + (x as usize))
    }

    /// Get width of the grid
    pub fn width(&self) -> u8 {
        COLUMNS
    }

    /// Get height of the grid
    pub fn height(&self) -> u8 {
        LINES
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Cells of one row, `None` below the bottom
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= LINES as usize {
            return None;
        }
        let start = y * COLUMNS as usize;
        Some(&self.cells[start..start + COLUMNS as usize])
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(COLUMNS as usize)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(is_full)
    }

    /// Check if a row has no blocks at all
    pub fn is_row_empty(&self, y: usize) -> bool {
        self.row(y).is_some_and(is_empty)
    }

    /// Remove full rows and restack the remaining blocks at the bottom.
    ///
    /// Only rows that are neither full nor empty are kept; they move down
    /// in their original order and the top is backfilled with empty rows.
    /// Returns the indices of the removed full rows, top to bottom.
    pub fn compact(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let width = COLUMNS as usize;
        let mut write_y = LINES as usize;

        // Scan from bottom to top
        for read_y in (0..LINES as usize).rev() {
            let src_start = read_y * width;
            let row = &self.cells[src_start..src_start + width];
            if is_full(row) {
                cleared.push(read_y);
                continue;
            }
            if is_empty(row) {
                continue;
            }

            write_y -= 1;
            if write_y != read_y {
                // copy_within handles the overlap
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared.reverse();
        cleared
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Render occupancy as text rows (`#` / `.`), top to bottom
    pub fn to_ascii(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| if cell.is_some() { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
