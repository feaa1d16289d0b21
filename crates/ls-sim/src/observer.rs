//! Simulation observer trait for progress reporting and event collection.

use ls_activity::{ActivityStack, Effect};
use ls_actor::ActorStore;
use ls_core::{ActorId, Tick};
use ls_order::{Dispatched, Order, OrderResult};

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the tick loop.
///
/// All methods default to no-ops.  Observers only watch: nothing they do
/// can feed back into the simulation.
///
/// # Example — shot counter
///
/// ```rust,ignore
/// struct Shots(usize);
///
/// impl SimObserver for Shots {
///     fn on_effect(&mut self, _tick: Tick, effect: &Effect) {
///         if matches!(effect, Effect::Fire { .. }) {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before orders are dispatched.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.  `ticked` is the number of actors
    /// whose stack had work this tick.
    fn on_tick_end(&mut self, _tick: Tick, _ticked: usize) {}

    /// Called once per dispatched order, rejected ones included.
    fn on_order(&mut self, _tick: Tick, _order: &Order, _result: &OrderResult<Dispatched>) {}

    /// Called for every effect after it has been applied.
    fn on_effect(&mut self, _tick: Tick, _effect: &Effect) {}

    fn on_actor_removed(&mut self, _tick: Tick, _actor: ActorId) {}

    /// Called every `config.snapshot_interval_ticks` ticks.
    fn on_snapshot(&mut self, _tick: Tick, _actors: &ActorStore, _stacks: &[ActivityStack]) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
