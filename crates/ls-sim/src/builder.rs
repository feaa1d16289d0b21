//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeMap;

use ls_activity::ActivityStack;
use ls_actor::{ActorRngs, ActorRules, ActorStore};
use ls_core::{ActorTypeId, Cell, PlayerId, SimClock, SimConfig, Tick};
use ls_grid::Grid;
use ls_order::{Dispatcher, Order};
use ls_reserve::ReservationRegistry;

use crate::{OrderStream, Sim, SimError, SimResult};

/// One actor to place when the sim is built.  Placements become actors in
/// order, so the n-th placement is `ActorId(n)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub kind:  ActorTypeId,
    pub owner: PlayerId,
    pub cell:  Cell,
}

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — tick count, seed, activity durations
/// - [`Grid`] — the map
/// - [`ActorRules`] — static per-type data
///
/// # Optional inputs
///
/// | Method           | Default                          |
/// |------------------|----------------------------------|
/// | `.actor(..)`     | No actors                        |
/// | `.order(..)`     | Empty order stream               |
/// | `.dispatcher(d)` | `Dispatcher::with_defaults()`    |
pub struct SimBuilder {
    config:     SimConfig,
    grid:       Grid,
    rules:      ActorRules,
    placements: Vec<Placement>,
    orders:     Vec<(Tick, Order)>,
    dispatcher: Option<Dispatcher>,
}

impl SimBuilder {
    pub fn new(config: SimConfig, grid: Grid, rules: ActorRules) -> Self {
        Self {
            config,
            grid,
            rules,
            placements: Vec::new(),
            orders:     Vec::new(),
            dispatcher: None,
        }
    }

    /// Place an actor with its anchor at `cell`.
    pub fn actor(mut self, kind: ActorTypeId, owner: PlayerId, cell: Cell) -> Self {
        self.placements.push(Placement { kind, owner, cell });
        self
    }

    pub fn actors(mut self, placements: impl IntoIterator<Item = Placement>) -> Self {
        self.placements.extend(placements);
        self
    }

    /// Schedule `order` to be dispatched at the start of `tick`.
    pub fn order(mut self, tick: Tick, order: Order) -> Self {
        self.orders.push((tick, order));
        self
    }

    pub fn orders(mut self, orders: impl IntoIterator<Item = (Tick, Order)>) -> Self {
        self.orders.extend(orders);
        self
    }

    pub fn dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Validate config, placements and order subjects, then place every
    /// actor.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        for p in &self.placements {
            check_placement(&self.grid, &self.rules, p.kind, p.cell)?;
        }
        let count = self.placements.len();
        for (tick, order) in &self.orders {
            if order.subject.index() >= count {
                return Err(SimError::UnknownSubject { tick: *tick, subject: order.subject, count });
            }
        }

        let mut actors = ActorStore::new();
        for p in &self.placements {
            if let Some(info) = self.rules.get(p.kind) {
                actors.spawn(p.kind, info, p.owner, p.cell);
            }
        }
        let mut rngs = ActorRngs::new(self.config.seed);
        rngs.sync(actors.len());

        Ok(Sim {
            clock:        SimClock::new(),
            stacks:       (0..actors.len()).map(|_| ActivityStack::new()).collect(),
            orders:       self.orders.into_iter().collect(),
            dispatcher:   self.dispatcher.unwrap_or_default(),
            reservations: ReservationRegistry::new(),
            docked:       BTreeMap::new(),
            pending:      Vec::new(),
            config:       self.config,
            grid:         self.grid,
            rules:        self.rules,
            actors,
            rngs,
        })
    }
}

/// Reject unknown kinds, footprints that leave the map, and mobile actors
/// placed on terrain they cannot stand on.
pub(crate) fn check_placement(
    grid:  &Grid,
    rules: &ActorRules,
    kind:  ActorTypeId,
    cell:  Cell,
) -> SimResult<()> {
    let info = rules.get(kind).ok_or(SimError::UnknownActorType(kind))?;
    if let Some(off) = info.footprint.iter().map(|o| cell.offset(o.x, o.y)).find(|&c| !grid.in_bounds(c)) {
        return Err(SimError::OutOfBounds { name: info.name.clone(), anchor: cell, cell: off });
    }
    if let Some(mover) = &info.mover {
        if !grid.is_passable(cell, mover) {
            return Err(SimError::Impassable { name: info.name.clone(), cell });
        }
    }
    Ok(())
}

