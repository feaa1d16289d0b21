//! `ls-reserve` — the reservation registry.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`registry`] | `ReservationRegistry`, `ReservationHandle`            |
//! | [`error`]    | `ReserveError`, `ReserveResult<T>`                    |
//!
//! The registry is the only mutable structure shared between actors during
//! a tick.  The simulation is single-threaded, so every `reserve`/`release`
//! call is atomic with respect to every other actor: two claimants can never
//! both see a target as free and both win it.

pub mod error;
pub mod registry;

#[cfg(test)]
mod tests;

pub use error::{ReserveError, ReserveResult};
pub use registry::{ReservationHandle, ReservationRegistry};
