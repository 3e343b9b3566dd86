//! Error types for board parsing, geometry lookups and move replay.

use crate::moves::Move;

/// Errors raised by the solver's fallible entry points
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// Encoding has the wrong length or contains symbols other than `0`/`1`
    #[error("Invalid encoding: {reason}")]
    InvalidEncoding { reason: String },

    /// Flat position index outside the board
    #[error("Position index {index} out of range (board has {cells} holes)")]
    IndexOutOfRange { index: usize, cells: usize },

    /// Row/column pair outside the triangle
    #[error("Coordinate ({row}, {col}) is not on the board")]
    CoordOutOfRange { row: usize, col: usize },

    /// A replayed move was not legal against the board it was applied to
    #[error("Move {mv} at step {step} is not legal")]
    IllegalMove { step: usize, mv: Move },
}
