//! `ls-core` — foundational types for the lockstep unit simulation.
//!
//! Every other `ls-*` crate depends on this one.  It has no `ls-*`
//! dependencies and only `rand` + `thiserror` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`ids`]    | `ActorId`, `PlayerId`, `ActorTypeId`                   |
//! | [`cell`]   | `Cell` grid coordinate, `WorldPos` sub-cell position   |
//! | [`time`]   | `Tick`, `SimClock`, `SimConfig`                        |
//! | [`rng`]    | `ActorRng` (per-actor, explicitly passed)              |
//! | [`error`]  | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!
//! # Determinism
//!
//! The simulation is a pure function of (grid, actor state, elapsed ticks,
//! order stream).  Nothing in this crate reads the clock or OS entropy.

pub mod cell;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{CELL_SIZE, Cell, WorldPos};
pub use error::{CoreError, CoreResult};
pub use ids::{ActorId, ActorTypeId, PlayerId};
pub use rng::ActorRng;
pub use time::{SimClock, SimConfig, Tick};
