use thiserror::Error;

use ls_core::ActorId;

/// Rejected claims.  These are contention outcomes, not faults: the
/// claimant is expected to wait, retry, or pick another target.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReserveError {
    #[error("{target} is already reserved by {holder}")]
    AlreadyHeld { target: ActorId, holder: ActorId },

    #[error("{0} cannot reserve itself")]
    SelfClaim(ActorId),
}

pub type ReserveResult<T> = Result<T, ReserveError>;
