//! `ls-sim` — the lockstep tick loop.
//!
//! # Tick loop
//!
//! ```text
//! for tick in clock..config.total_ticks:
//!   ① Orders   — dispatch every order scheduled at or before this tick,
//!                in stream order.
//!   ② Actors   — tick each in-world actor's activity stack once, in
//!                ascending ActorId order.
//!   ③ Effects  — apply deferred effects in emission order:
//!                  Destroy            → remove actor, drop its claims and
//!                                       claims on it, clear its stack
//!                  TransferOwnership  → new owner, stack canceled
//!                  DockOccupant       → dock occupancy table
//!                  Fire / Signal      → observer only
//! ```
//!
//! Everything that can differ between two participants is a function of the
//! grid, the rules, the initial placements, `SimConfig`, and the order
//! stream.  [`Sim::state_hash`] condenses the mutable state into one `u64`
//! so participants can compare it every tick.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut sim = SimBuilder::new(config, grid, rules)
//!     .actor(tank, PlayerId(1), Cell::new(2, 2))
//!     .order(Tick(5), Order::at_cell(OrderKind::Move, ActorId(0), Cell::new(9, 9)))
//!     .build()?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod orders;
pub mod sim;


pub use builder::{Placement, SimBuilder};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use orders::OrderStream;
pub use sim::Sim;
