//! Core types module - shared data structures and constants
//!
//! This module defines the plain data used by the engine and by whatever
//! presentation layer sits on top of it. Nothing here depends on other crates.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 lines (indexed 0-19, top to bottom)
//!
//! # Timing
//!
//! The falling piece advances once per timer interval (`FALL_INTERVAL_MS`).
//! The interval is constant; there is no level-based speed curve.
//!
//! # Examples
//!
//! ```
//! use classic_tetris_types::{Command, Rotation, ShapeKind, COLUMNS, LINES};
//!
//! let rotation = Rotation::Normal.next();
//! assert_eq!(rotation, Rotation::Right);
//! assert_eq!(rotation.previous(), Rotation::Normal);
//!
//! assert_eq!(ShapeKind::from_str("square"), Some(ShapeKind::Square));
//! assert!(!ShapeKind::Square.is_rotatable());
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//!
//! assert_eq!(COLUMNS, 10);
//! assert_eq!(LINES, 20);
//! ```

/// Board width in cells (10 columns)
pub const COLUMNS: u8 = 10;

/// Board height in cells (20 lines)
pub const LINES: u8 = 20;

/// Interval between two gravity ticks (1000ms = one row per second)
pub const FALL_INTERVAL_MS: u32 = 1000;

/// Number of distinct shapes in the catalog
pub const SHAPE_COUNT: usize = 7;

/// Rotation states, ordered cyclically (Normal = spawn orientation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Normal,
    Right,
    Mirrored,
    Left,
}

impl Rotation {
    /// All rotations in cyclic order
    pub const ALL: [Rotation; 4] = [
        Rotation::Normal,
        Rotation::Right,
        Rotation::Mirrored,
        Rotation::Left,
    ];

    /// Position in the cycle (Normal = 0)
    pub fn index(self) -> usize {
        match self {
            Rotation::Normal => 0,
            Rotation::Right => 1,
            Rotation::Mirrored => 2,
            Rotation::Left => 3,
        }
    }

    /// Next state clockwise
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous state (counter-clockwise)
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" | "n" => Some(Rotation::Normal),
            "right" | "r" => Some(Rotation::Right),
            "mirrored" | "m" => Some(Rotation::Mirrored),
            "left" | "l" => Some(Rotation::Left),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::Normal => "normal",
            Rotation::Right => "right",
            Rotation::Mirrored => "mirrored",
            Rotation::Left => "left",
        }
    }
}

/// The seven piece shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    LLeft,
    LRight,
    TTurned,
    Square,
    ZLeft,
    ZRight,
}

impl ShapeKind {
    /// All shapes in catalog order
    pub const ALL: [ShapeKind; SHAPE_COUNT] = [
        ShapeKind::Line,
        ShapeKind::LLeft,
        ShapeKind::LRight,
        ShapeKind::TTurned,
        ShapeKind::Square,
        ShapeKind::ZLeft,
        ShapeKind::ZRight,
    ];

    /// Position in the catalog
    pub fn index(self) -> usize {
        match self {
            ShapeKind::Line => 0,
            ShapeKind::LLeft => 1,
            ShapeKind::LRight => 2,
            ShapeKind::TTurned => 3,
            ShapeKind::Square => 4,
            ShapeKind::ZLeft => 5,
            ShapeKind::ZRight => 6,
        }
    }

    /// Square looks the same in every orientation; everything else turns.
    pub fn is_rotatable(self) -> bool {
        !matches!(self, ShapeKind::Square)
    }

    /// Parse shape kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "line" | "i" => Some(ShapeKind::Line),
            "lleft" | "j" => Some(ShapeKind::LLeft),
            "lright" | "l" => Some(ShapeKind::LRight),
            "tturned" | "t" => Some(ShapeKind::TTurned),
            "square" | "o" => Some(ShapeKind::Square),
            "zleft" | "s" => Some(ShapeKind::ZLeft),
            "zright" | "z" => Some(ShapeKind::ZRight),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::LLeft => "lleft",
            ShapeKind::LRight => "lright",
            ShapeKind::TTurned => "tturned",
            ShapeKind::Square => "square",
            ShapeKind::ZLeft => "zleft",
            ShapeKind::ZRight => "zright",
        }
    }
}

/// RGB color of a block. Cosmetic only; the rules never look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as 0xRRGGBB
    pub fn to_rgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Unpack from 0xRRGGBB (upper byte ignored)
    pub fn from_rgb(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }
}

/// A single occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub color: Color,
}

impl Block {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

/// Cell on the board or in a shape matrix (None = empty)
pub type Cell = Option<Block>;

/// Discrete commands fed in by the input side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    RotateClockwise,
    RotateCounterClockwise,
    HardDrop,
    TogglePause,
}

impl Command {
    /// Parse command from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotatecw" | "rotateclockwise" => Some(Command::RotateClockwise),
            "rotateccw" | "rotatecounterclockwise" => Some(Command::RotateCounterClockwise),
            "harddrop" => Some(Command::HardDrop),
            "togglepause" | "pause" => Some(Command::TogglePause),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::RotateClockwise => "rotateCw",
            Command::RotateCounterClockwise => "rotateCcw",
            Command::HardDrop => "hardDrop",
            Command::TogglePause => "togglePause",
        }
    }

    /// Whether the command changes the falling piece (as opposed to session state)
    pub fn moves_piece(self) -> bool {
        !matches!(self, Command::TogglePause)
    }
}
