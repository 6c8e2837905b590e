//! Errors for building a grid out of caller-supplied data.
//!
//! Gameplay itself never fails: illegal moves are rejected in place and a
//! blocked spawn is a state transition, not an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has {found} rows, at most {max} fit")]
    TooManyRows { found: usize, max: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown cell {found:?} at row {row}, column {column}")]
    UnknownCell {
        row: usize,
        column: usize,
        found: char,
    },
}
