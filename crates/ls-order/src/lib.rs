//! `ls-order` — from a player's click to an actor's activity chain.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`order`]      | `Order`, `OrderKind`, `Cursor`                            |
//! | [`targeter`]   | `OrderTargeter` trait, `OrderContext<'a>`                 |
//! | [`builtin`]    | Move, Enter, Dock, Capture, Attack, Sell, Stop targeters  |
//! | [`dispatcher`] | `Dispatcher`, `Dispatched`                                |
//! | [`error`]      | `OrderError`, `OrderResult<T>`                            |
//!
//! # Flow
//!
//! 1. **Targeting**: for a subject and a hovered actor or cell, every
//!    targeter that applies to the subject is asked for a [`Cursor`].  The
//!    highest-priority targeter with an unblocked cursor wins; equal
//!    priorities go to the one registered first.
//! 2. **Issue**: the chosen [`Order`] is validated again against the world
//!    (it may have been recorded ticks earlier) and resolved into an
//!    activity chain, which either replaces the subject's stack (immediate)
//!    or is appended to it (queued).
//!
//! Orders are plain data so they can be recorded, replayed, and sent to
//! every lockstep participant unchanged.

pub mod builtin;
pub mod dispatcher;
pub mod error;
pub mod order;
pub mod targeter;

#[cfg(test)]
mod tests;

pub use builtin::{
    AttackTargeter, CaptureTargeter, DockTargeter, EnterTargeter, MoveTargeter, SellTargeter,
    StopTargeter,
};
pub use dispatcher::{Dispatched, Dispatcher};
pub use error::{OrderError, OrderResult};
pub use order::{Cursor, Order, OrderKind};
pub use targeter::{OrderContext, OrderTargeter};
