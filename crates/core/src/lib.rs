//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-block game and nothing else:
//! no window, no terminal, no input devices. A presentation layer feeds it
//! ticks and commands and reads its state back.
//!
//! # Module Structure
//!
//! - [`catalog`]: the seven shapes and their precomputed orientations
//! - [`grid`]: 10x20 field of locked blocks, row predicates, line compaction
//! - [`board`]: the falling piece, collision checks, lock, tick
//! - [`game_loop`]: pause / game over / reset around the board
//! - [`events`]: callbacks from the engine to the presentation layer
//! - [`rng`]: seeded generator for shapes and colors
//! - [`snapshot`]: serializable read model
//!
//! # Rules
//!
//! - A new piece appears at the top center in its normal orientation.
//! - Each tick moves it down one row; when it cannot move it locks.
//! - The tick after a lock clears full rows, then spawns the next piece.
//! - Moves and rotations that would collide are silently ignored (no kicks).
//! - If a new piece does not fit, the game is over.
//!
//! # Example
//!
//! ```
//! use classic_tetris_core::{GameConfig, GameLoop};
//! use classic_tetris_types::Command;
//!
//! let mut game = GameLoop::headless(GameConfig::default().with_seed(12345));
//! game.start();
//!
//! // First tick spawns a piece.
//! game.on_tick();
//! assert!(game.board().active().is_some());
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::RotateClockwise);
//! assert!(game.apply(Command::HardDrop));
//!
//! // The piece is locked; the next tick brings a new one.
//! assert!(game.board().active().is_none());
//! game.on_tick();
//! assert!(game.board().active().is_some());
//! ```

pub mod board;
pub mod catalog;
pub mod error;
pub mod events;
pub mod game_loop;
pub mod grid;
pub mod rng;
pub mod snapshot;
pub mod stats;

pub use classic_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Fall, Phase, Piece, TickOutcome};
pub use catalog::{generate_shape_list, rotate_shape, Catalog, Matrix, RotationTable, Shape};
pub use error::GridError;
pub use events::{EventRecorder, GameEvent, GameEvents, GameOverChoice, NoEvents};
pub use game_loop::{Flow, GameConfig, GameLoop, Status};
pub use grid::{is_empty, is_full, Grid};
pub use rng::SimpleRng;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use stats::Stats;
