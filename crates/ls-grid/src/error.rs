//! Grid-subsystem error type.

use thiserror::Error;

use ls_core::Cell;

/// Errors produced by `ls-grid`.
///
/// `NoPath` and `SearchBudgetExhausted` are ordinary search outcomes, not
/// faults: callers match on them and decide whether to wait, retry, or give
/// up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("no path from {from}")]
    NoPath { from: Cell },

    #[error("search from {from} gave up after {expanded} expansions")]
    SearchBudgetExhausted { from: Cell, expanded: usize },

    #[error("cell {0} is outside the map")]
    OutOfBounds(Cell),

    #[error("map parse error: {0}")]
    Parse(String),
}

pub type GridResult<T> = Result<T, GridError>;
