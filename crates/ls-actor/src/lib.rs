//! `ls-actor` — actor storage for the lockstep simulation.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`store`] | `ActorStore` (SoA arrays + occupancy index), `ActorRngs`      |
//! | [`rules`] | `ActorInfo`, `ActorRules` (static per-type definitions)       |
//!
//! # Identity
//!
//! `ActorId`s are handed out densely in spawn order and never reused.  A
//! removed actor keeps its slot with `in_world == false`, so a stale
//! `ActorId` held by an activity or a reservation can always be checked
//! rather than silently aliasing a newer actor.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `ActorInfo`.            |

pub mod rules;
pub mod store;

#[cfg(test)]
mod tests;

pub use rules::{ActorInfo, ActorRules};
pub use store::{ActorRngs, ActorStore, OccupancyView};
