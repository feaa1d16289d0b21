use thiserror::Error;

use ls_core::ActorId;
use ls_reserve::ReserveError;

use crate::OrderKind;

/// Why an order could not be issued.  The subject's stack is untouched
/// unless stated otherwise.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("{0} is not in the world")]
    UnknownSubject(ActorId),

    #[error("no targeter registered for {0} orders")]
    NoTargeter(OrderKind),

    #[error("{kind} order does not apply to {subject}")]
    Ineligible { kind: OrderKind, subject: ActorId },

    #[error("{0} order is missing its target")]
    MissingTarget(OrderKind),

    /// Raised while resolving, after an immediate order has already
    /// canceled the subject's previous chain.
    #[error(transparent)]
    Reserve(#[from] ReserveError),
}

pub type OrderResult<T> = Result<T, OrderError>;
