//! Simulation time model and run configuration.
//!
//! Time is a monotonically increasing `Tick` counter.  There is no mapping to
//! wall-clock time: lockstep participants only agree on tick numbers, and
//! every duration in the simulation (retry waits, dock times, sell
//! animations) is an integer number of ticks.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self` (zero if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick.  Cheap to copy, holds no heap data.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current_tick)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Every participant in a session must use an identical `SimConfig`; it is
/// part of the determinism contract alongside the map and the order stream.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Total ticks to simulate in `Sim::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Call `SimObserver::on_snapshot` every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,

    /// How long a mover waits after a failed path search before retrying.
    pub path_retry_ticks: u32,

    /// How many consecutive failed searches a mover tolerates before it
    /// abandons its move.
    pub path_retry_limit: u32,

    /// How long a docking actor waits before looking for a free dock again.
    pub dock_retry_ticks: u32,

    /// Ticks spent docked before the dock sequence completes.
    pub dock_ticks: u32,

    /// Ticks between starting a sale and the building being removed.
    pub sell_ticks: u32,

    /// Ticks a captor spends committed on the target before ownership
    /// changes hands.
    pub capture_ticks: u32,

    /// Ticks between consecutive shots of an attacking actor.
    pub attack_cooldown_ticks: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks:             1_000,
            seed:                    0,
            snapshot_interval_ticks: 0,
            path_retry_ticks:        5,
            path_retry_limit:        3,
            dock_retry_ticks:        25,
            dock_ticks:              10,
            sell_ticks:              8,
            capture_ticks:           5,
            attack_cooldown_ticks:   15,
        }
    }
}

impl SimConfig {
    /// The tick at which `Sim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Reject durations that would make a waiting task complete instantly
    /// and spin every tick.
    pub fn validate(&self) -> CoreResult<()> {
        let checks = [
            ("path_retry_ticks", self.path_retry_ticks),
            ("dock_retry_ticks", self.dock_retry_ticks),
            ("attack_cooldown_ticks", self.attack_cooldown_ticks),
        ];
        for (name, value) in checks {
            if value == 0 {
                return Err(CoreError::Config(format!("{name} must be > 0")));
            }
        }
        Ok(())
    }
}
