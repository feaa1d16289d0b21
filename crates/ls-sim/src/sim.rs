//! The `Sim` struct and its tick loop.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use ls_activity::{ActivityStack, Effect, Target, TickContext};
use ls_actor::{ActorRngs, ActorRules, ActorStore};
use ls_core::{ActorId, ActorTypeId, Cell, PlayerId, SimClock, SimConfig, Tick};
use ls_grid::Grid;
use ls_order::{Dispatched, Dispatcher, Order, OrderContext, OrderResult};
use ls_reserve::ReservationRegistry;

use crate::builder::check_placement;
use crate::{OrderStream, SimError, SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation runner.
///
/// Holds all simulation state and drives the three-phase tick loop described
/// in the crate docs.  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config: SimConfig,

    /// The next tick to be processed.
    pub clock: SimClock,

    pub grid: Grid,

    pub rules: ActorRules,

    /// SoA actor state.
    pub actors: ActorStore,

    /// Per-actor deterministic RNGs, kept apart for the split-borrow pattern.
    pub rngs: ActorRngs,

    /// Activity stacks, indexed by `ActorId`.
    pub stacks: Vec<ActivityStack>,

    pub reservations: ReservationRegistry,

    pub dispatcher: Dispatcher,

    /// Orders not yet dispatched.
    pub orders: OrderStream,

    /// Dock → the actor currently shown docked there.
    pub docked: BTreeMap<ActorId, ActorId>,

    /// Effects emitted during the current tick.
    pub(crate) pending: Vec<Effect>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while self.now() < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.now());
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// Process one tick and advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.now();
        observer.on_tick_start(now);
        let ticked = self.process_tick(now, observer);
        observer.on_tick_end(now, ticked);
        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.actors, &self.stacks);
        }
        self.clock.advance();
    }

    /// Add `order` to the stream for `tick`.  A tick already processed means
    /// "next tick".
    pub fn schedule(&mut self, tick: Tick, order: Order) {
        self.orders.push(tick, order);
    }

    /// Dispatch `order` right away, outside the tick loop.
    pub fn issue(&mut self, order: &Order) -> OrderResult<Dispatched> {
        let mut ctx = OrderContext {
            grid:         &self.grid,
            rules:        &self.rules,
            actors:       &self.actors,
            reservations: &mut self.reservations,
            stacks:       &mut self.stacks,
        };
        self.dispatcher.issue(order, &mut ctx)
    }

    /// Place a new actor mid-game.
    pub fn spawn(&mut self, kind: ActorTypeId, owner: PlayerId, cell: Cell) -> SimResult<ActorId> {
        check_placement(&self.grid, &self.rules, kind, cell)?;
        let Some(info) = self.rules.get(kind) else {
            return Err(SimError::UnknownActorType(kind));
        };
        let id = self.actors.spawn(kind, info, owner, cell);
        self.rngs.sync(self.actors.len());
        self.stacks.push(ActivityStack::new());
        log::debug!("{id}: spawned {} at {cell}", info.name);
        Ok(id)
    }

    pub fn stack(&self, actor: ActorId) -> Option<&ActivityStack> {
        self.stacks.get(actor.index())
    }

    /// `true` when no actor has pending work and no orders are waiting.
    pub fn is_quiet(&self) -> bool {
        self.orders.is_empty() && self.stacks.iter().all(ActivityStack::is_idle)
    }

    /// Digest of all mutable state, for lockstep desync checks.
    ///
    /// Covers the tick, every actor's presence, kind, owner and position,
    /// the shape and targets of every stack, reservations, and docks.
    /// `FxHasher` is unseeded, so equal states hash equally on every run and
    /// every machine.
    pub fn state_hash(&self) -> u64 {
        let mut h = FxHasher::default();
        self.now().hash(&mut h);
        for a in self.actors.actor_ids() {
            let live = self.actors.is_in_world(a);
            live.hash(&mut h);
            if !live {
                continue;
            }
            self.actors.kind_of(a).hash(&mut h);
            self.actors.owner(a).hash(&mut h);
            self.actors.position(a).hash(&mut h);
            for act in self.stacks[a.index()].iter() {
                act.kind.name().hash(&mut h);
                act.is_canceled().hash(&mut h);
                hash_target(act.kind.target(), &mut h);
            }
            // Chain separator.
            u8::MAX.hash(&mut h);
        }
        for (target, holder) in self.reservations.iter() {
            (target, holder).hash(&mut h);
        }
        for (dock, occupant) in &self.docked {
            (dock, occupant).hash(&mut h);
        }
        h.finish()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> usize {
        // ── Phase 1: orders ───────────────────────────────────────────────
        for order in self.orders.drain_until(now) {
            let result = self.issue(&order);
            observer.on_order(now, &order, &result);
        }

        // ── Phase 2: one activity tick per in-world actor ─────────────────
        //
        // Ascending ActorId.  World changes that affect other actors are
        // deferred, so the order only matters for moves and claims, and that
        // order is the same on every participant.
        let ids: Vec<ActorId> = self.actors.live_ids().collect();
        let mut ticked = 0;
        for actor in ids {
            if !self.actors.is_in_world(actor) {
                continue;
            }
            let Some(rng) = self.rngs.get_mut(actor) else { continue };
            let mut ctx = TickContext {
                actor,
                tick:         now,
                grid:         &self.grid,
                rules:        &self.rules,
                actors:       &mut self.actors,
                reservations: &mut self.reservations,
                rng,
                config:       &self.config,
                effects:      &mut self.pending,
            };
            if self.stacks[actor.index()].tick(&mut ctx) {
                ticked += 1;
            }
        }

        // ── Phase 3: effects, in emission order ───────────────────────────
        for effect in std::mem::take(&mut self.pending) {
            self.apply_effect(now, &effect, observer);
            observer.on_effect(now, &effect);
        }
        ticked
    }

    fn apply_effect<O: SimObserver>(&mut self, now: Tick, effect: &Effect, observer: &mut O) {
        match *effect {
            Effect::Destroy(actor) => {
                if !self.actors.remove(actor) {
                    return;
                }
                let freed = self.reservations.release_claimant(actor);
                if let Some(holder) = self.reservations.release_target(actor) {
                    log::debug!("{actor}: claim by {holder} dropped");
                }
                self.docked.remove(&actor);
                self.docked.retain(|_, occupant| *occupant != actor);
                if let Some(stack) = self.stacks.get_mut(actor.index()) {
                    stack.clear();
                }
                log::info!("{now}: {actor} removed (released {} claims)", freed.len());
                observer.on_actor_removed(now, actor);
            }
            Effect::TransferOwnership { actor, to } => {
                if self.actors.set_owner(actor, to).is_ok() {
                    if let Some(stack) = self.stacks.get_mut(actor.index()) {
                        stack.cancel();
                    }
                    log::info!("{now}: {actor} now owned by {to}");
                }
            }
            Effect::DockOccupant { dock, occupant } => match occupant {
                Some(o) if self.actors.is_in_world(dock) => {
                    self.docked.insert(dock, o);
                }
                _ => {
                    self.docked.remove(&dock);
                }
            },
            Effect::Fire { .. } | Effect::Signal { .. } => {}
        }
    }
}

fn hash_target(target: Target, h: &mut FxHasher) {
    match target {
        Target::None        => 0u8.hash(h),
        Target::Actor(a)    => (1u8, a).hash(h),
        Target::Cell(c)     => (2u8, c).hash(h),
        Target::Position(p) => (3u8, p).hash(h),
    }
}
