//! Order data.

use std::fmt;

use ls_core::{ActorId, Cell};

/// The order vocabulary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OrderKind {
    Move,
    Enter,
    Dock,
    Capture,
    Attack,
    Sell,
    Stop,
}

impl OrderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderKind::Move    => "move",
            OrderKind::Enter   => "enter",
            OrderKind::Dock    => "dock",
            OrderKind::Capture => "capture",
            OrderKind::Attack  => "attack",
            OrderKind::Sell    => "sell",
            OrderKind::Stop    => "stop",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One player instruction to one actor.
///
/// At most one of `target_actor` / `target_cell` is meaningful for a given
/// kind; self-targeted kinds (sell, stop) use neither.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    pub kind:    OrderKind,
    pub subject: ActorId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_actor: Option<ActorId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_cell: Option<Cell>,
    /// Append to the current chain instead of replacing it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub queued: bool,
}

impl Order {
    /// A self-targeted order.
    pub fn new(kind: OrderKind, subject: ActorId) -> Self {
        Self { kind, subject, target_actor: None, target_cell: None, queued: false }
    }

    pub fn on_actor(kind: OrderKind, subject: ActorId, target: ActorId) -> Self {
        Self { target_actor: Some(target), ..Self::new(kind, subject) }
    }

    pub fn at_cell(kind: OrderKind, subject: ActorId, cell: Cell) -> Self {
        Self { target_cell: Some(cell), ..Self::new(kind, subject) }
    }

    pub fn stop(subject: ActorId) -> Self {
        Self::new(OrderKind::Stop, subject)
    }

    pub fn queued(mut self, queued: bool) -> Self {
        self.queued = queued;
        self
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.subject, self.kind)?;
        if let Some(a) = self.target_actor {
            write!(f, " {a}")?;
        }
        if let Some(c) = self.target_cell {
            write!(f, " {c}")?;
        }
        if self.queued {
            f.write_str(" (queued)")?;
        }
        Ok(())
    }
}

/// Affordance shown for a candidate order.  Presentation only: the
/// simulation never reads it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cursor {
    Move,
    MoveBlocked,
    Enter,
    EnterBlocked,
    Capture,
    Attack,
    Sell,
    Stop,
}

impl Cursor {
    /// A blocked cursor is shown but never issued.
    pub fn is_blocked(self) -> bool {
        matches!(self, Cursor::MoveBlocked | Cursor::EnterBlocked)
    }
}
