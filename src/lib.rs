//! Classic Tetris (workspace facade crate).
//!
//! Re-exports `classic_tetris::{core, types}` while the implementation lives
//! in dedicated crates under `crates/`.

pub use classic_tetris_core as core;
pub use classic_tetris_types as types;
