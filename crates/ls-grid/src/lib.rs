//! `ls-grid` — static tile map, mover cost model, and path search.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`terrain`] | `Terrain`, `MoverProfile`, `Cost`, `BASE_STEP_COST`         |
//! | [`grid`]    | `Grid`, `GridBuilder`, `Connectivity`, `Occupancy`          |
//! | [`search`]  | `PathSearch`, `Heuristic`, `Route`, `find_bidi_path`        |
//! | [`error`]   | `GridError`, `GridResult<T>`                                |
//!
//! # Read-only map
//!
//! A `Grid` is immutable once built.  Dynamic occupancy (other actors
//! standing on cells) is never stored here: searches that need it receive an
//! [`Occupancy`] predicate for the duration of one call.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on terrain and profiles.   |

pub mod error;
pub mod grid;
pub mod search;
pub mod terrain;


pub use error::{GridError, GridResult};
pub use grid::{Connectivity, Grid, GridBuilder, Occupancy};
pub use search::{Heuristic, PathSearch, Route, find_bidi_path};
pub use terrain::{BASE_STEP_COST, Cost, MoverProfile, TERRAIN_COUNT, Terrain};
