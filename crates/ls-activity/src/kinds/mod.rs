//! Built-in behaviours.
//!
//! Each behaviour is a small state struct with a `tick` that reports a
//! [`Step`]; [`Activity::tick`](crate::Activity::tick) turns the step into
//! the chain's new head.  Behaviours never see their own successors.

mod attack;
mod call;
mod capture;
mod dock;
mod movement;
mod sell;
mod wait;

pub use attack::Attack;
pub use call::CallFunc;
pub use capture::Capture;
pub use dock::Dock;
pub use movement::{Enter, Move, MoveAdjacentTo};
pub use sell::Sell;
pub use wait::Wait;

use crate::Activity;

/// Result of one behaviour tick.
pub(crate) enum Step {
    /// Stay at the head.
    Continue,
    /// Hand over to the successor.
    Complete,
    /// Run this chain first, then resume the current node.
    Prefix(Box<Activity>),
    /// Finish, running this chain before the successor.
    CompleteWith(Box<Activity>),
}
