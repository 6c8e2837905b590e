//! Board module - the grid plus the falling piece
//!
//! The board owns the locked blocks (a [`Grid`]) and at most one falling
//! [`Piece`]. The falling piece is never written into the grid until it locks.
//!
//! Lifecycle per piece:
//!
//! ```text
//!   Empty --tick: clear lines, spawn--> Falling --lock--> Empty
//!     \                                    |
//!      `--spawn blocked--> GameOver <------'  (only via the next spawn)
//! ```
//!
//! Every move is checked with [`Board::is_placeable`] before anything is
//! mutated; a rejected move leaves the piece untouched. There are no wall kicks.

use arrayvec::ArrayVec;

use crate::catalog::{Catalog, Matrix, Shape, MAX_SIDE};
use crate::grid::{ClearedRows, Grid};
use crate::rng::SimpleRng;
use crate::stats::Stats;
use crate::types::{Rotation, ShapeKind, COLUMNS, LINES};

/// Absolute cells of the falling piece
pub type PieceCells = ArrayVec<(i8, i8), { MAX_SIDE * MAX_SIDE }>;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: ShapeKind,
    pub rotation: Rotation,
    /// Column of the matrix's left edge
    pub x: i8,
    /// Row of the matrix's top edge
    pub y: i8,
}

/// Coarse board state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No piece is falling; the next tick spawns one
    Empty,
    Falling,
    /// A spawn was blocked; everything is a no-op until `reset`
    GameOver,
}

/// Result of [`Board::fall_one_step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fall {
    Moved,
    Locked,
    /// No falling piece (or game over)
    Idle,
}

/// Result of [`Board::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Board is in game over; nothing happened
    Halted,
    Fell,
    Locked,
    /// Lines were cleared (possibly zero) and a new piece appeared
    Spawned { shape: ShapeKind, cleared: u32 },
    /// Lines were cleared (possibly zero) and the next piece did not fit
    GameOver { cleared: u32 },
}

#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    catalog: Catalog,
    rng: SimpleRng,
    active: Option<Piece>,
    game_over: bool,
}

impl Board {
    /// Create an empty board. The seed drives shape selection and colors.
    pub fn new(seed: u32) -> Self {
        Self::with_grid(seed, Grid::new())
    }

    /// Create a board on top of an existing set of locked blocks
    pub fn with_grid(seed: u32, grid: Grid) -> Self {
        let mut rng = SimpleRng::new(seed);
        let catalog = Catalog::new(&mut rng);
        Self {
            grid,
            catalog,
            rng,
            active: None,
            game_over: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    /// Shape of the falling piece
    pub fn active_shape(&self) -> Option<&Shape> {
        self.active.map(|piece| self.catalog.shape(piece.shape))
    }

    /// Matrix of the falling piece in its current rotation
    pub fn active_matrix(&self) -> Option<&Matrix> {
        self.active
            .map(|piece| self.catalog.shape(piece.shape).matrix(piece.rotation))
    }

    /// Absolute (x, y) of every occupied cell of the falling piece
    pub fn active_cells(&self) -> PieceCells {
        let mut out = PieceCells::new();
        if let Some(piece) = self.active {
            let matrix = self.catalog.shape(piece.shape).matrix(piece.rotation);
            for (row, col, _) in matrix.occupied() {
                out.push((piece.x + col as i8, piece.y + row as i8));
            }
        }
        out
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.active.is_some() {
            Phase::Falling
        } else {
            Phase::Empty
        }
    }

    /// Could `shape` in `rotation` sit with its top-left corner at (x, y)?
    ///
    /// The bounding box must lie inside the grid and no occupied cell of the
    /// matrix may cover a locked block. Bounds are checked before any cell
    /// is looked up.
    pub fn is_placeable(&self, shape: ShapeKind, rotation: Rotation, x: i8, y: i8) -> bool {
        let matrix = self.catalog.shape(shape).matrix(rotation);

        let (x, y) = (x as i16, y as i16);
        if x < 0
            || y < 0
            || x + matrix.cols() as i16 > COLUMNS as i16
            || y + matrix.rows() as i16 > LINES as i16
        {
            return false;
        }

        matrix.occupied().all(|(row, col, _)| {
            !self
                .grid
                .is_occupied((x + col as i16) as i8, (y + row as i16) as i8)
        })
    }

    /// Spawn a uniformly random shape at the top center
    pub fn spawn_next_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let shape = self.rng.next_shape();
        self.spawn(shape)
    }

    /// Spawn `shape` at the top center in its normal rotation.
    ///
    /// If it does not fit, the board enters game over instead and the grid
    /// is left untouched. Returns whether a piece is now falling.
    pub fn spawn(&mut self, shape: ShapeKind) -> bool {
        if self.game_over {
            return false;
        }

        let width = self.catalog.shape(shape).width(Rotation::Normal);
        let x = (COLUMNS / 2) as i8 - (width / 2) as i8;

        if !self.is_placeable(shape, Rotation::Normal, x, 0) {
            log::info!("spawn of {} blocked at x={}, game over", shape.as_str(), x);
            self.active = None;
            self.game_over = true;
            return false;
        }

        log::debug!("spawned {} at x={}", shape.as_str(), x);
        self.active = Some(Piece {
            shape,
            rotation: Rotation::Normal,
            x,
            y: 0,
        });
        true
    }

    /// Move the falling piece down one row, or lock it if it cannot move
    pub fn fall_one_step(&mut self) -> Fall {
        if self.game_over {
            return Fall::Idle;
        }
        let Some(piece) = self.active else {
            return Fall::Idle;
        };

        if self.is_placeable(piece.shape, piece.rotation, piece.x, piece.y + 1) {
            self.active = Some(Piece {
                y: piece.y + 1,
                ..piece
            });
            Fall::Moved
        } else {
            self.lock(piece);
            Fall::Locked
        }
    }

    /// Turn the falling piece one step; rejected if the result does not fit
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if self.game_over {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let rotation = if clockwise {
            piece.rotation.next()
        } else {
            piece.rotation.previous()
        };

        if !self.is_placeable(piece.shape, rotation, piece.x, piece.y) {
            log::trace!("rotation to {} rejected", rotation.as_str());
            return false;
        }

        self.active = Some(Piece { rotation, ..piece });
        true
    }

    /// Shift the falling piece one column; rejected if the result does not fit
    pub fn move_horizontal(&mut self, to_right: bool) -> bool {
        if self.game_over {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let x = if to_right { piece.x + 1 } else { piece.x - 1 };

        if !self.is_placeable(piece.shape, piece.rotation, x, piece.y) {
            log::trace!("move to x={} rejected", x);
            return false;
        }

        self.active = Some(Piece { x, ..piece });
        true
    }

    /// Row the falling piece would land on if dropped now
    pub fn ghost_y(&self) -> Option<i8> {
        let piece = self.active?;
        let mut y = piece.y;
        while self.is_placeable(piece.shape, piece.rotation, piece.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Drop the falling piece as far as it goes and lock it immediately.
    ///
    /// Returns the number of rows it fell, or `None` if there was nothing to drop.
    pub fn hard_drop(&mut self) -> Option<u8> {
        if self.game_over {
            return None;
        }
        let piece = self.active?;
        let landing_y = self.ghost_y()?;

        let landed = Piece {
            y: landing_y,
            ..piece
        };
        self.lock(landed);
        Some((landing_y - piece.y) as u8)
    }

    /// Advance the game by one timer interval.
    ///
    /// With a piece falling this is one [`Board::fall_one_step`]. Without one,
    /// full lines are cleared (each counted in `stats`) and the next piece
    /// is spawned.
    pub fn tick(&mut self, stats: &mut Stats) -> TickOutcome {
        if self.game_over {
            return TickOutcome::Halted;
        }

        if self.active.is_some() {
            return match self.fall_one_step() {
                Fall::Moved => TickOutcome::Fell,
                Fall::Locked => TickOutcome::Locked,
                Fall::Idle => TickOutcome::Halted,
            };
        }

        let cleared = self.clear_full_lines(stats).len() as u32;
        let shape = self.rng.next_shape();
        if self.spawn(shape) {
            TickOutcome::Spawned { shape, cleared }
        } else {
            TickOutcome::GameOver { cleared }
        }
    }

    /// Remove full rows and let the rest settle at the bottom.
    ///
    /// Each removed row increments `stats` once. Returns the removed row
    /// indices, top to bottom.
    pub fn clear_full_lines(&mut self, stats: &mut Stats) -> ClearedRows {
        let cleared = self.grid.compact();
        for _ in &cleared {
            stats.increment_removed_lines();
        }
        if !cleared.is_empty() {
            log::debug!(
                "cleared {} line(s), {} total",
                cleared.len(),
                stats.removed_lines()
            );
        }
        cleared
    }

    /// Empty the grid, drop the falling piece and leave game over
    pub fn reset(&mut self) {
        self.active = None;
        self.game_over = false;
        self.grid.clear();
    }

    /// Copy the piece's blocks into the grid and release it
    fn lock(&mut self, piece: Piece) {
        let matrix = *self.catalog.shape(piece.shape).matrix(piece.rotation);
        for (row, col, block) in matrix.occupied() {
            self.grid
                .set(piece.x + col as i8, piece.y + row as i8, Some(block));
        }
        log::debug!(
            "locked {} at ({}, {}) {}",
            piece.shape.as_str(),
            piece.x,
            piece.y,
            piece.rotation.as_str()
        );
        self.active = None;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: &[&str]) -> Board {
        Board::with_grid(1, Grid::from_ascii(rows).unwrap())
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(12345);
        assert_eq!(board.phase(), Phase::Empty);
        assert_eq!(board.grid().occupied_count(), 0);
        assert!(board.active().is_none());
    }

    #[test]
    fn test_spawn_centers_every_shape() {
        for kind in ShapeKind::ALL {
            let mut board = Board::new(1);
            assert!(board.spawn(kind));

            let piece = board.active().unwrap();
            let width = board.catalog().shape(kind).width(Rotation::Normal) as i8;
            assert_eq!(piece.x, 5 - width / 2, "{:?}", kind);
            assert_eq!(piece.y, 0);
            assert_eq!(piece.rotation, Rotation::Normal);
        }
    }

    #[test]
    fn test_spawn_square_at_four() {
        let mut board = Board::new(1);
        assert!(board.spawn(ShapeKind::Square));
        assert_eq!(board.active().unwrap().x, 4);
        assert_eq!(board.active().unwrap().y, 0);
    }

    #[test]
    fn test_spawn_next_piece_is_deterministic() {
        let mut a = Board::new(99);
        let mut b = Board::new(99);
        for _ in 0..20 {
            a.reset();
            b.reset();
            assert!(a.spawn_next_piece());
            assert!(b.spawn_next_piece());
            assert_eq!(a.active(), b.active());
        }
    }

    #[test]
    fn test_is_placeable_bounds() {
        let board = Board::new(1);
        let t = ShapeKind::TTurned;

        assert!(board.is_placeable(t, Rotation::Normal, 0, 0));
        assert!(board.is_placeable(t, Rotation::Normal, 7, 18));
        // right edge: 8 + 3 > 10
        assert!(!board.is_placeable(t, Rotation::Normal, 8, 0));
        // bottom: 19 + 2 > 20
        assert!(!board.is_placeable(t, Rotation::Normal, 0, 19));
        assert!(!board.is_placeable(t, Rotation::Normal, -1, 0));
        assert!(!board.is_placeable(t, Rotation::Normal, 0, -1));
    }

    #[test]
    fn test_is_placeable_ignores_empty_matrix_cells() {
        // T normal is ".#." over "###"; its top corners are empty.
        let board = board_from(&["#.#.......", ".........."]);
        assert!(board.is_placeable(ShapeKind::TTurned, Rotation::Normal, 0, 18));
        assert!(!board.is_placeable(ShapeKind::TTurned, Rotation::Normal, 0, 17));
    }

    #[test]
    fn test_fall_one_step_moves_then_locks() {
        let mut board = Board::new(1);
        board.spawn(ShapeKind::Square);

        for expected_y in 1..=18 {
            assert_eq!(board.fall_one_step(), Fall::Moved);
            assert_eq!(board.active().unwrap().y, expected_y);
        }
        assert_eq!(board.grid().occupied_count(), 0);

        assert_eq!(board.fall_one_step(), Fall::Locked);
        assert!(board.active().is_none());
        assert!(board.grid().is_occupied(4, 18));
        assert!(board.grid().is_occupied(5, 19));
        assert_eq!(board.grid().occupied_count(), 4);

        assert_eq!(board.fall_one_step(), Fall::Idle);
    }

    #[test]
    fn test_locked_blocks_keep_shape_color() {
        let mut board = Board::new(3);
        board.spawn(ShapeKind::ZLeft);
        board.hard_drop();

        let color = board.catalog().shape(ShapeKind::ZLeft).color();
        let blocks: Vec<_> = board.grid().cells().iter().flatten().collect();
        assert_eq!(blocks.len(), 4);
        assert!(blocks.iter().all(|b| b.color == color));
    }

    #[test]
    fn test_rotate_against_wall_is_rejected() {
        let mut board = Board::new(1);
        board.spawn(ShapeKind::Line);
        while board.move_horizontal(true) {}

        let before = board.active().unwrap();
        assert_eq!(before.x, 9);

        assert!(!board.rotate(true));
        assert!(!board.rotate(false));
        assert_eq!(board.active().unwrap(), before);
    }

    #[test]
    fn test_rotate_into_locked_block_is_rejected() {
        let mut rows = vec![".........."; 20];
        rows[0] = "......#...";
        let mut board = Board::with_grid(1, Grid::from_ascii(&rows).unwrap());
        board.spawn(ShapeKind::Line);
        let before = board.active().unwrap();
        assert_eq!((before.x, before.y), (5, 0));

        // Right turns the line into a 1x4 row covering columns 5..=8 at y=0.
        assert!(!board.rotate(true));
        assert_eq!(board.active().unwrap(), before);
    }

    #[test]
    fn test_rotate_cycles() {
        let mut board = Board::new(1);
        board.spawn(ShapeKind::TTurned);
        for _ in 0..3 {
            board.fall_one_step();
        }

        let start = board.active().unwrap();
        for expected in [
            Rotation::Right,
            Rotation::Mirrored,
            Rotation::Left,
            Rotation::Normal,
        ] {
            assert!(board.rotate(true));
            assert_eq!(board.active().unwrap().rotation, expected);
        }
        assert!(board.rotate(false));
        assert_eq!(board.active().unwrap().rotation, Rotation::Left);
        assert_eq!(board.active().unwrap().x, start.x);
    }

    #[test]
    fn test_move_horizontal_stops_at_walls() {
        let mut board = Board::new(1);
        board.spawn(ShapeKind::Square);

        let mut moves = 0;
        while board.move_horizontal(false) {
            moves += 1;
        }
        assert_eq!(moves, 4);
        assert_eq!(board.active().unwrap().x, 0);

        moves = 0;
        while board.move_horizontal(true) {
            moves += 1;
        }
        assert_eq!(moves, 8);
        assert_eq!(board.active().unwrap().x, 8);
    }

    #[test]
    fn test_hard_drop_rests_on_stack() {
        let mut board = board_from(&[
            "....#.....",
            "..........",
            "..........",
            "..........",
            "..........",
        ]);
        board.spawn(ShapeKind::Square);

        assert_eq!(board.ghost_y(), Some(13));
        assert_eq!(board.hard_drop(), Some(13));
        assert!(board.active().is_none());
        for (x, y) in [(4, 13), (5, 13), (4, 14), (5, 14)] {
            assert!(board.grid().is_occupied(x, y));
        }
        assert_eq!(board.grid().occupied_count(), 5);

        assert_eq!(board.hard_drop(), None);
    }

    #[test]
    fn test_tick_spawns_then_falls_then_locks() {
        let mut board = Board::new(5);
        let mut stats = Stats::new();

        let outcome = board.tick(&mut stats);
        assert!(matches!(outcome, TickOutcome::Spawned { cleared: 0, .. }));

        let mut ticks = 0;
        loop {
            match board.tick(&mut stats) {
                TickOutcome::Fell => ticks += 1,
                TickOutcome::Locked => break,
                other => panic!("unexpected {:?}", other),
            }
        }
        assert!(ticks >= 16);
        assert_eq!(board.phase(), Phase::Empty);
        assert_eq!(board.grid().occupied_count(), 4);
    }

    #[test]
    fn test_tick_clears_lines_before_spawning() {
        let mut board = board_from(&["##########", "#########."]);
        let mut stats = Stats::new();

        match board.tick(&mut stats) {
            TickOutcome::Spawned { cleared, .. } => assert_eq!(cleared, 1),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(stats.removed_lines(), 1);
        assert_eq!(board.grid().occupied_count(), 9);
        assert!(board.grid().is_occupied(0, 19));
    }

    #[test]
    fn test_clear_full_lines_single_row() {
        let mut board = board_from(&["##########"]);
        let mut stats = Stats::new();

        let cleared = board.clear_full_lines(&mut stats);
        assert_eq!(cleared.as_slice(), &[19]);
        assert_eq!(stats.removed_lines(), 1);
        assert_eq!(board.grid().occupied_count(), 0);
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut rows = vec![".........."; 20];
        rows[0] = "...####...";
        rows[1] = "...####...";
        let grid = Grid::from_ascii(&rows).unwrap();

        for kind in ShapeKind::ALL {
            let mut board = Board::with_grid(1, grid.clone());
            assert!(!board.spawn(kind), "{:?}", kind);
            assert!(board.is_game_over());
            assert!(board.active().is_none());
            assert_eq!(board.grid(), &grid);
        }
    }

    #[test]
    fn test_game_over_freezes_board() {
        // A gap-free stack up to the top; compaction keeps every row in place.
        let mut rows = vec!["#........."; 20];
        rows[0] = "...####...";
        let mut board = Board::with_grid(1, Grid::from_ascii(&rows).unwrap());
        let mut stats = Stats::new();

        assert!(matches!(
            board.tick(&mut stats),
            TickOutcome::GameOver { cleared: 0 }
        ));
        let grid = board.grid().clone();

        assert_eq!(board.tick(&mut stats), TickOutcome::Halted);
        assert!(!board.rotate(true));
        assert!(!board.move_horizontal(false));
        assert_eq!(board.hard_drop(), None);
        assert!(!board.spawn_next_piece());
        assert_eq!(board.grid(), &grid);

        board.reset();
        assert_eq!(board.phase(), Phase::Empty);
        assert_eq!(board.grid().occupied_count(), 0);
        assert!(board.spawn(ShapeKind::Square));
    }

    #[test]
    fn test_active_cells_are_absolute() {
        let mut board = Board::new(1);
        board.spawn(ShapeKind::TTurned);
        let cells = board.active_cells();
        assert_eq!(cells.as_slice(), &[(5, 0), (4, 1), (5, 1), (6, 1)]);
    }

    #[test]
    fn test_active_shape_follows_rotation() {
        let mut board = Board::new(1);
        assert!(board.active_shape().is_none());
        assert!(board.active_matrix().is_none());

        board.spawn(ShapeKind::Line);
        assert_eq!(board.active_shape().unwrap().kind(), ShapeKind::Line);
        let matrix = board.active_matrix().unwrap();
        assert_eq!((matrix.rows(), matrix.cols()), (4, 1));

        assert!(board.rotate(true));
        let matrix = board.active_matrix().unwrap();
        assert_eq!((matrix.rows(), matrix.cols()), (1, 4));
    }
}
