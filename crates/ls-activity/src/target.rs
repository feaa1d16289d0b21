//! What an activity intends to interact with.

use std::fmt;

use ls_actor::ActorStore;
use ls_core::{ActorId, Cell, WorldPos};

/// A captured target.  Actor targets may go stale: always check
/// [`is_valid`](Self::is_valid) before acting on one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    None,
    Actor(ActorId),
    Cell(Cell),
    Position(WorldPos),
}

impl Target {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Target::None)
    }

    /// `false` for `None` and for actors no longer in the world.
    pub fn is_valid(&self, actors: &ActorStore) -> bool {
        match *self {
            Target::None => false,
            Target::Actor(a) => actors.is_in_world(a),
            Target::Cell(_) | Target::Position(_) => true,
        }
    }

    /// Cell the target currently occupies (an actor's anchor cell).
    pub fn cell(&self, actors: &ActorStore) -> Option<Cell> {
        match *self {
            Target::None => None,
            Target::Actor(a) => actors.position(a),
            Target::Cell(c) => Some(c),
            Target::Position(p) => Some(p.to_cell()),
        }
    }

    pub fn actor(&self) -> Option<ActorId> {
        match *self {
            Target::Actor(a) => Some(a),
            _ => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::None => f.write_str("none"),
            Target::Actor(a) => write!(f, "{a}"),
            Target::Cell(c) => write!(f, "{c}"),
            Target::Position(p) => write!(f, "{p}"),
        }
    }
}
