//! Deferred world changes and one-shot callback actions.

use ls_core::{ActorId, PlayerId};
use ls_reserve::ReservationHandle;

use crate::Activity;

/// A change requested during a tick and applied by the simulation after
/// every actor has ticked, in emission order.
///
/// Effects are reported, not interpreted: damage and economy are outside the
/// core, so `Fire` and `Signal` only reach observers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Remove the actor from the world.
    Destroy(ActorId),
    TransferOwnership { actor: ActorId, to: PlayerId },
    /// `spread` is a cosmetic scatter offset drawn from the attacker's RNG.
    Fire { attacker: ActorId, target: ActorId, spread: i32 },
    Signal { actor: ActorId, code: u32 },
    /// The dock's visible occupant changed.
    DockOccupant { dock: ActorId, occupant: Option<ActorId> },
}

/// What a [`CallFunc`](crate::CallFunc) does on its single tick.
#[derive(Debug)]
pub enum Action {
    /// Emit [`Effect::Signal`] for the acting actor.
    Signal(u32),
    /// Release a reservation (no-op if the handle is stale).
    Release(ReservationHandle),
    SetDockOccupant { dock: ActorId, occupant: Option<ActorId> },
    /// Run this chain next, ahead of the callback's own successors.
    Queue(Box<Activity>),
    Effect(Effect),
}

impl Action {
    /// Actor the action refers to, if any.
    pub(crate) fn referenced_actor(&self) -> Option<ActorId> {
        match self {
            Action::SetDockOccupant { dock, .. } => Some(*dock),
            _ => None,
        }
    }
}
