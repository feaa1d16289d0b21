use thiserror::Error;

use ls_core::{ActorId, ActorTypeId, Cell, CoreError, Tick};

/// Construction-time problems.  The tick loop itself never fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("unknown actor type {0}")]
    UnknownActorType(ActorTypeId),

    #[error("{name} at {anchor}: footprint cell {cell} is outside the map")]
    OutOfBounds {
        name:   String,
        anchor: Cell,
        cell:   Cell,
    },

    #[error("{name} cannot stand on {cell}")]
    Impassable { name: String, cell: Cell },

    #[error("order at {tick} names {subject}, but only {count} actors are placed")]
    UnknownSubject {
        tick:    Tick,
        subject: ActorId,
        count:   usize,
    },
}

pub type SimResult<T> = Result<T, SimError>;
