//! Everything one activity tick may read or change.

use ls_actor::{ActorInfo, ActorRules, ActorStore};
use ls_core::{ActorId, ActorRng, Cell, SimConfig, Tick};
use ls_grid::Grid;
use ls_reserve::ReservationRegistry;

use crate::Effect;

/// Borrowed world state for one actor's tick.
///
/// Static data (`grid`, `rules`, `config`) is shared; the store and the
/// registry are borrowed mutably because an activity may move its actor or
/// claim a dock.  Changes that affect *other* actors go through `effects`.
pub struct TickContext<'a> {
    pub actor:        ActorId,
    pub tick:         Tick,
    pub grid:         &'a Grid,
    pub rules:        &'a ActorRules,
    pub actors:       &'a mut ActorStore,
    pub reservations: &'a mut ReservationRegistry,
    pub rng:          &'a mut ActorRng,
    pub config:       &'a SimConfig,
    pub effects:      &'a mut Vec<Effect>,
}

impl<'a> TickContext<'a> {
    #[inline]
    pub fn position(&self) -> Option<Cell> {
        self.actors.position(self.actor)
    }

    /// Static rules of the acting actor.
    pub fn info(&self) -> Option<&'a ActorInfo> {
        self.info_of(self.actor)
    }

    pub fn info_of(&self, actor: ActorId) -> Option<&'a ActorInfo> {
        let rules: &'a ActorRules = self.rules;
        self.actors.kind_of(actor).and_then(|k| rules.get(k))
    }

    #[inline]
    pub fn emit(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// World cell where a docking actor stands for `dock`.
    pub fn dock_cell(&self, dock: ActorId) -> Option<Cell> {
        let anchor = self.actors.position(dock)?;
        let offset = self.info_of(dock)?.dock_offset?;
        Some(anchor.offset(offset.x, offset.y))
    }
}
