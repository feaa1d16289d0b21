//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` where they
//! need to surface configuration problems.

use thiserror::Error;

use crate::{ActorId, Cell};

/// The base error type for `ls-core` and configuration validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    #[error("cell {0} is outside the map")]
    OutOfBounds(Cell),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ls-core`.
pub type CoreResult<T> = Result<T, CoreError>;
