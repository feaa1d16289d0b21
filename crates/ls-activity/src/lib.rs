//! `ls-activity` — the per-actor behaviour scheduler.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`activity`] | `Activity` node, `ActivityKind`, composition, cancellation |
//! | [`stack`]    | `ActivityStack` (the per-actor head + outcome)             |
//! | [`kinds`]    | Built-in behaviours: wait, call, move, dock, sell, …       |
//! | [`context`]  | `TickContext` handed to every tick                         |
//! | [`target`]   | `Target` tagged union                                      |
//! | [`effect`]   | `Effect` (deferred world changes), `Action`                |
//!
//! # Chains, not trees
//!
//! An actor's pending work is a singly linked list of boxed [`Activity`]
//! nodes.  Each node owns its successor and nothing else: there are no
//! back-links, so cancellation and completion only ever walk forward.
//!
//! Every tick the head is consumed by [`Activity::tick`] and whatever it
//! returns becomes the new head:
//!
//! | Returned            | Meaning                                          |
//! |---------------------|--------------------------------------------------|
//! | the same node       | continue next tick                               |
//! | a different node    | substitution (e.g. "move into range" in front)   |
//! | its successor       | completed                                        |
//! | `None`              | chain finished, actor idle                       |
//!
//! # Determinism
//!
//! Activities read the world through [`TickContext`] and never touch global
//! state.  Cosmetic randomness comes from the actor's own RNG in the
//! context; world changes that affect other actors (destruction, ownership)
//! are emitted as [`Effect`]s and applied by the simulation at the end of
//! the tick, in emission order.

pub mod activity;
pub mod context;
pub mod effect;
pub mod kinds;
pub mod stack;
pub mod target;


pub use activity::{Activity, ActivityKind};
pub use context::TickContext;
pub use effect::{Action, Effect};
pub use kinds::{Attack, CallFunc, Capture, Dock, Enter, Move, MoveAdjacentTo, Sell, Wait};
pub use stack::{ActivityStack, Outcome};
pub use target::Target;
