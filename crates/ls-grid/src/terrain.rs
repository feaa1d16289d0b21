//! Terrain classes and the per-mover cost model.
//!
//! # Cost units
//!
//! All costs are integers.  Entering a cell whose terrain a mover crosses at
//! 100 % speed costs [`BASE_STEP_COST`]; faster terrain is cheaper, slower
//! terrain dearer (`BASE_STEP_COST * 100 / speed_percent`).  Diagonal and
//! orthogonal steps cost the same.  Integer costs keep searches bit-identical
//! across platforms.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Path cost in abstract units.
pub type Cost = u32;

/// Cost of entering one cell at 100 % speed.
pub const BASE_STEP_COST: Cost = 100;

/// Number of [`Terrain`] variants.
pub const TERRAIN_COUNT: usize = 5;

// ── Terrain ───────────────────────────────────────────────────────────────────

/// Static terrain class of one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Terrain {
    #[default]
    Clear = 0,
    Road  = 1,
    Rough = 2,
    Water = 3,
    Cliff = 4,
}

impl Terrain {
    pub const ALL: [Terrain; TERRAIN_COUNT] = [
        Terrain::Clear,
        Terrain::Road,
        Terrain::Rough,
        Terrain::Water,
        Terrain::Cliff,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Map glyph used by [`GridBuilder::from_rows`](crate::GridBuilder::from_rows).
    pub fn glyph(self) -> char {
        match self {
            Terrain::Clear => '.',
            Terrain::Road  => '=',
            Terrain::Rough => '^',
            Terrain::Water => '~',
            Terrain::Cliff => '#',
        }
    }

    pub fn from_glyph(c: char) -> Option<Terrain> {
        Terrain::ALL.into_iter().find(|t| t.glyph() == c)
    }
}

// ── MoverProfile ──────────────────────────────────────────────────────────────

/// How one class of mover (infantry, wheeled, naval, …) crosses each terrain.
///
/// A speed of `0` marks the terrain impassable for this mover.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoverProfile {
    pub name:      String,
    speed_percent: [u16; TERRAIN_COUNT],
}

impl MoverProfile {
    /// A profile that can enter nothing.  Chain [`with_speed`](Self::with_speed)
    /// to open terrain up.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), speed_percent: [0; TERRAIN_COUNT] }
    }

    pub fn with_speed(mut self, terrain: Terrain, percent: u16) -> Self {
        self.speed_percent[terrain.index()] = percent;
        self
    }

    /// Foot soldiers: uniform over land, slowed a little by rough ground.
    pub fn infantry() -> Self {
        Self::new("infantry")
            .with_speed(Terrain::Clear, 100)
            .with_speed(Terrain::Road, 100)
            .with_speed(Terrain::Rough, 80)
    }

    /// Wheeled vehicles: fast on roads, crawl over rough ground.
    pub fn wheeled() -> Self {
        Self::new("wheeled")
            .with_speed(Terrain::Clear, 100)
            .with_speed(Terrain::Road, 125)
            .with_speed(Terrain::Rough, 50)
    }

    pub fn naval() -> Self {
        Self::new("naval").with_speed(Terrain::Water, 100)
    }

    #[inline]
    pub fn speed_percent(&self, terrain: Terrain) -> u16 {
        self.speed_percent[terrain.index()]
    }

    #[inline]
    pub fn can_enter(&self, terrain: Terrain) -> bool {
        self.speed_percent(terrain) > 0
    }

    /// Cost of stepping into a cell of `terrain`, or `None` when impassable.
    #[inline]
    pub fn entry_cost(&self, terrain: Terrain) -> Option<Cost> {
        match self.speed_percent(terrain) {
            0 => None,
            s => Some((BASE_STEP_COST * 100 / s as Cost).max(1)),
        }
    }

    /// Cheapest single step this mover can take anywhere.  Used to scale the
    /// distance heuristic so it never overestimates.
    pub fn min_step_cost(&self) -> Cost {
        Terrain::ALL
            .into_iter()
            .filter_map(|t| self.entry_cost(t))
            .min()
            .unwrap_or(0)
    }
}
