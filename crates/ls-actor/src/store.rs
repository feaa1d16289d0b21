//! Actor storage: `ActorStore` (SoA state + occupancy) and `ActorRngs`.
//!
//! # Why two structs?
//!
//! An activity tick needs `&mut ActorStore` (it may move its actor) and
//! `&mut ActorRng` for the same actor at once.  Keeping RNGs outside the
//! store lets the simulation hand out both borrows without fighting the
//! borrow checker.
//!
//! # Occupancy index
//!
//! `occupancy` maps each cell to the in-world actors covering it.  It is a
//! lookup-only structure: nothing iterates it, so the hash map's ordering
//! can never leak into simulation results.  Each per-cell list is kept
//! sorted by `ActorId`.

use rustc_hash::FxHashMap;

use ls_core::{ActorId, ActorRng, ActorTypeId, Cell, CoreError, CoreResult, PlayerId};
use ls_grid::Occupancy;

use crate::rules::ActorInfo;

// ── ActorRngs ─────────────────────────────────────────────────────────────────

/// Per-actor deterministic RNG state, indexed by `ActorId`.
pub struct ActorRngs {
    seed:  u64,
    inner: Vec<ActorRng>,
}

impl ActorRngs {
    pub fn new(global_seed: u64) -> Self {
        Self { seed: global_seed, inner: Vec::new() }
    }

    /// Seed RNGs for every actor id below `count` that doesn't have one yet.
    pub fn sync(&mut self, count: usize) {
        while self.inner.len() < count {
            let id = ActorId(self.inner.len() as u32);
            self.inner.push(ActorRng::new(self.seed, id));
        }
    }

    #[inline]
    pub fn get_mut(&mut self, actor: ActorId) -> Option<&mut ActorRng> {
        self.inner.get_mut(actor.index())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── ActorStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for every actor ever spawned.
///
/// Every `Vec` has one element per spawned actor; `ActorId` is the index.
/// Removed actors keep their slot with `in_world[i] == false`.
#[derive(Default)]
pub struct ActorStore {
    /// Actor type.  Fixed at spawn.
    pub kind: Vec<ActorTypeId>,

    owner:     Vec<PlayerId>,
    /// Anchor cell; the footprint is relative to it.
    position:  Vec<Cell>,
    in_world:  Vec<bool>,
    blocking:  Vec<bool>,
    footprint: Vec<Vec<Cell>>,

    occupancy: FxHashMap<Cell, Vec<ActorId>>,
}

impl ActorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of actors ever spawned (including removed ones).
    #[inline]
    pub fn len(&self) -> usize {
        self.kind.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    /// All ids in ascending order, removed actors included.
    pub fn actor_ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        (0..self.len() as u32).map(ActorId)
    }

    /// In-world ids in ascending order.
    pub fn live_ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.actor_ids().filter(|&a| self.is_in_world(a))
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Place a new actor with its anchor at `cell`.
    ///
    /// Bounds are the caller's concern; the store knows nothing of the map.
    pub fn spawn(&mut self, kind: ActorTypeId, info: &ActorInfo, owner: PlayerId, cell: Cell) -> ActorId {
        let id = ActorId(self.len() as u32);
        self.kind.push(kind);
        self.owner.push(owner);
        self.position.push(cell);
        self.in_world.push(true);
        self.blocking.push(info.blocks);
        self.footprint.push(info.footprint.clone());
        self.index_insert(id);
        id
    }

    /// Take an actor out of the world.  Returns `false` if it already was.
    pub fn remove(&mut self, actor: ActorId) -> bool {
        if !self.is_in_world(actor) {
            return false;
        }
        self.index_remove(actor);
        self.in_world[actor.index()] = false;
        true
    }

    #[inline]
    pub fn is_in_world(&self, actor: ActorId) -> bool {
        self.in_world.get(actor.index()).copied().unwrap_or(false)
    }

    // ── State ─────────────────────────────────────────────────────────────

    /// Anchor cell, `None` once removed.
    #[inline]
    pub fn position(&self, actor: ActorId) -> Option<Cell> {
        self.is_in_world(actor).then(|| self.position[actor.index()])
    }

    #[inline]
    pub fn owner(&self, actor: ActorId) -> Option<PlayerId> {
        self.is_in_world(actor).then(|| self.owner[actor.index()])
    }

    #[inline]
    pub fn kind_of(&self, actor: ActorId) -> Option<ActorTypeId> {
        self.kind.get(actor.index()).copied()
    }

    /// `true` when both actors are in the world and owned by the same player.
    pub fn same_owner(&self, a: ActorId, b: ActorId) -> bool {
        matches!((self.owner(a), self.owner(b)), (Some(x), Some(y)) if x == y)
    }

    pub fn move_to(&mut self, actor: ActorId, cell: Cell) -> CoreResult<()> {
        if !self.is_in_world(actor) {
            return Err(CoreError::ActorNotFound(actor));
        }
        self.index_remove(actor);
        self.position[actor.index()] = cell;
        self.index_insert(actor);
        Ok(())
    }

    pub fn set_owner(&mut self, actor: ActorId, owner: PlayerId) -> CoreResult<()> {
        if !self.is_in_world(actor) {
            return Err(CoreError::ActorNotFound(actor));
        }
        self.owner[actor.index()] = owner;
        Ok(())
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Cells covered by the actor's footprint; empty once removed.
    pub fn occupied_cells(&self, actor: ActorId) -> impl Iterator<Item = Cell> + '_ {
        let (anchor, offsets) = match self.position(actor) {
            Some(p) => (p, self.footprint[actor.index()].as_slice()),
            None => (Cell::default(), &[][..]),
        };
        offsets.iter().map(move |o| anchor.offset(o.x, o.y))
    }

    /// Footprint cell closest to `from`; ties go to the smaller cell.
    pub fn nearest_occupied_cell(&self, actor: ActorId, from: Cell) -> Option<Cell> {
        self.occupied_cells(actor)
            .min_by_key(|&c| (c.distance_sq(from), c))
    }

    /// `true` if `cell` is on or next to (including diagonally) the actor's
    /// footprint.
    pub fn is_adjacent_to(&self, actor: ActorId, cell: Cell) -> bool {
        self.occupied_cells(actor).any(|c| c.is_adjacent_or_same(cell))
    }

    /// Cells touching the footprint but not part of it, sorted.
    pub fn cells_around(&self, actor: ActorId) -> Vec<Cell> {
        let own: Vec<Cell> = self.occupied_cells(actor).collect();
        let mut ring: Vec<Cell> = own
            .iter()
            .flat_map(|c| {
                (-1..=1).flat_map(move |dy| (-1..=1).map(move |dx| c.offset(dx, dy)))
            })
            .filter(|c| !own.contains(c))
            .collect();
        ring.sort_unstable();
        ring.dedup();
        ring
    }

    /// In-world actors covering `cell`, ascending.
    pub fn occupants(&self, cell: Cell) -> &[ActorId] {
        self.occupancy.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a blocking actor other than `mover` stands on `cell`.
    pub fn blocks(&self, cell: Cell, mover: ActorId) -> bool {
        self.occupants(cell)
            .iter()
            .any(|&a| a != mover && self.blocking[a.index()])
    }

    /// An [`Occupancy`] view for path searches that ignores `mover` itself.
    pub fn occupancy_for(&self, mover: ActorId) -> OccupancyView<'_> {
        OccupancyView { store: self, mover, ignore: None }
    }

    // ── Index maintenance ─────────────────────────────────────────────────

    fn index_insert(&mut self, actor: ActorId) {
        let cells: Vec<Cell> = self.occupied_cells(actor).collect();
        for c in cells {
            let list = self.occupancy.entry(c).or_default();
            if let Err(pos) = list.binary_search(&actor) {
                list.insert(pos, actor);
            }
        }
    }

    fn index_remove(&mut self, actor: ActorId) {
        let cells: Vec<Cell> = self.occupied_cells(actor).collect();
        for c in cells {
            if let Some(list) = self.occupancy.get_mut(&c) {
                list.retain(|&a| a != actor);
                if list.is_empty() {
                    self.occupancy.remove(&c);
                }
            }
        }
    }
}

// ── OccupancyView ─────────────────────────────────────────────────────────────

/// Blocking predicate over the store, excluding the searching mover.
#[derive(Copy, Clone)]
pub struct OccupancyView<'a> {
    store:  &'a ActorStore,
    mover:  ActorId,
    ignore: Option<ActorId>,
}

impl OccupancyView<'_> {
    /// Also ignore `other` (e.g. the actor being entered or captured).
    pub fn ignoring(mut self, other: ActorId) -> Self {
        self.ignore = Some(other);
        self
    }
}

impl Occupancy for OccupancyView<'_> {
    fn is_blocked(&self, cell: Cell) -> bool {
        self.store
            .occupants(cell)
            .iter()
            .any(|&a| a != self.mover && Some(a) != self.ignore && self.store.blocking[a.index()])
    }
}
