//! Static per-type actor definitions.
//!
//! Rules are loaded once before the simulation starts and never mutated.
//! Everything that varies per actor at runtime lives in
//! [`ActorStore`](crate::ActorStore).

use ls_core::{ActorTypeId, Cell};
use ls_grid::MoverProfile;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ── ActorInfo ─────────────────────────────────────────────────────────────────

/// Definition of one actor type.
///
/// Footprint and dock cells are offsets from the actor's anchor cell (its
/// `position` in the store).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActorInfo {
    pub name: String,

    /// `None` for immobile actors (buildings).
    pub mover: Option<MoverProfile>,

    pub footprint: Vec<Cell>,

    /// Where a docking actor stands.  Actors with a dock are reservable.
    pub dock_offset: Option<Cell>,

    /// Whether this actor stops others walking through its cells.
    pub blocks: bool,

    pub sellable:    bool,
    pub capturable:  bool,
    pub can_capture: bool,
    /// May dock at a friendly dock (ore trucks and the like).
    pub harvester:   bool,

    /// Weapon reach in cells; `None` means unarmed.
    pub attack_range: Option<u32>,
}

impl Default for ActorInfo {
    fn default() -> Self {
        Self {
            name:         String::new(),
            mover:        None,
            footprint:    vec![Cell::new(0, 0)],
            dock_offset:  None,
            blocks:       true,
            sellable:     false,
            capturable:   false,
            can_capture:  false,
            harvester:    false,
            attack_range: None,
        }
    }
}

impl ActorInfo {
    /// A single-cell mobile unit.
    pub fn unit(name: impl Into<String>, mover: MoverProfile) -> Self {
        Self { name: name.into(), mover: Some(mover), ..Self::default() }
    }

    /// An immobile `w`×`h` structure anchored at its top-left cell.
    pub fn building(name: impl Into<String>, w: i32, h: i32) -> Self {
        let footprint = (0..h)
            .flat_map(|y| (0..w).map(move |x| Cell::new(x, y)))
            .collect();
        Self { name: name.into(), footprint, ..Self::default() }
    }

    pub fn with_dock(mut self, offset: Cell) -> Self {
        self.dock_offset = Some(offset);
        self
    }

    pub fn with_attack_range(mut self, range: u32) -> Self {
        self.attack_range = Some(range);
        self
    }

    pub fn sellable(mut self) -> Self {
        self.sellable = true;
        self
    }

    pub fn capturable(mut self) -> Self {
        self.capturable = true;
        self
    }

    pub fn can_capture(mut self) -> Self {
        self.can_capture = true;
        self
    }

    pub fn harvester(mut self) -> Self {
        self.harvester = true;
        self
    }

    pub fn non_blocking(mut self) -> Self {
        self.blocks = false;
        self
    }

    #[inline]
    pub fn is_mobile(&self) -> bool {
        self.mover.is_some()
    }

    #[inline]
    pub fn has_dock(&self) -> bool {
        self.dock_offset.is_some()
    }
}

// ── ActorRules ────────────────────────────────────────────────────────────────

/// All actor types, indexed by [`ActorTypeId`].
#[derive(Clone, Debug, Default)]
pub struct ActorRules {
    infos: Vec<ActorInfo>,
}

impl ActorRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type.  Ids are assigned in registration order.
    pub fn add(&mut self, info: ActorInfo) -> ActorTypeId {
        let id = ActorTypeId(self.infos.len() as u16);
        self.infos.push(info);
        id
    }

    #[inline]
    pub fn get(&self, kind: ActorTypeId) -> Option<&ActorInfo> {
        self.infos.get(kind.index())
    }

    pub fn by_name(&self, name: &str) -> Option<ActorTypeId> {
        self.infos
            .iter()
            .position(|i| i.name == name)
            .map(|i| ActorTypeId(i as u16))
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActorTypeId, &ActorInfo)> {
        self.infos
            .iter()
            .enumerate()
            .map(|(i, info)| (ActorTypeId(i as u16), info))
    }
}
