use thiserror::Error;

use crate::validate::Rejection;

/// Reasons a [`Generator`](crate::Generator) may fail to produce a puzzle.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateError {
    /// No puzzle exists at this size: a dimension is zero, or the grid is a single cell.
    #[error("cannot generate a {width}x{height} puzzle")]
    DegenerateInput { width: usize, height: usize },

    /// The grid ended up with more regions than there are symbols to print them with.
    #[error("{regions} regions but only {available} printable symbols")]
    AlphabetExceeded { regions: usize, available: usize },

    /// The grid was refused by validation.
    #[error("puzzle rejected: {0}")]
    StructuralInvalid(#[from] Rejection),

    /// A configured limit on attempts ran out before any grid was accepted.
    #[error("no valid puzzle in {0} attempts")]
    AttemptsExhausted(usize),
}
