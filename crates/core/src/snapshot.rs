//! Read-only view of a session for renderers and observers.

use serde::{Serialize, Serializer};

use crate::board::Board;
use crate::game_loop::Status;
use crate::types::{COLUMNS, LINES};

/// Locked blocks as packed 0xRRGGBB colors, `None` = empty
pub type ColorGrid = [[Option<u32>; COLUMNS as usize]; LINES as usize];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSnapshot {
    pub shape: &'static str,
    pub rotation: &'static str,
    pub x: i8,
    pub y: i8,
    /// Row the piece would land on
    pub ghost_y: i8,
    pub color: u32,
    /// Absolute (x, y) of each occupied cell
    pub cells: Vec<(i8, i8)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub board: ColorGrid,
    pub active: Option<ActiveSnapshot>,
    pub status: Status,
    pub paused: bool,
    pub game_over: bool,
    pub lines: u32,
}

impl GameSnapshot {
    pub fn capture(board: &Board, lines: u32, status: Status) -> Self {
        let mut grid: ColorGrid = [[None; COLUMNS as usize]; LINES as usize];
        for (y, row) in board.grid().rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                grid[y][x] = cell.map(|block| block.color.to_rgb());
            }
        }

        let active = board.active().map(|piece| ActiveSnapshot {
            shape: piece.shape.as_str(),
            rotation: piece.rotation.as_str(),
            x: piece.x,
            y: piece.y,
            ghost_y: board.ghost_y().unwrap_or(piece.y),
            color: board.catalog().shape(piece.shape).color().to_rgb(),
            cells: board.active_cells().to_vec(),
        });

        Self {
            board: grid,
            active,
            status,
            paused: status == Status::Paused,
            game_over: status == Status::GameOver,
            lines,
        }
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Serialize for Status {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
