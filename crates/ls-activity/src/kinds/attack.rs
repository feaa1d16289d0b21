use ls_core::{ActorId, Tick};

use super::Step;
use crate::{Activity, Effect, TickContext};

/// Cosmetic scatter bound for `Effect::Fire`.
const MAX_SPREAD: i32 = 64;

/// Close to weapon range, then fire every `attack_cooldown_ticks` until the
/// target is gone or the order is canceled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attack {
    pub target: ActorId,
    ready_at:   Tick,
}

impl Attack {
    pub fn new(target: ActorId) -> Self {
        Self { target, ready_at: Tick::ZERO }
    }

    pub(crate) fn tick(&mut self, ctx: &mut TickContext<'_>) -> Step {
        let Some(range) = ctx.info().and_then(|i| i.attack_range) else {
            return Step::Complete;
        };
        let Some(pos) = ctx.position() else { return Step::Complete };
        if ctx.actors.same_owner(ctx.actor, self.target) {
            return Step::Complete;
        }
        let Some(aim) = ctx.actors.nearest_occupied_cell(self.target, pos) else {
            return Step::Complete;
        };

        let reach = range as i64;
        if aim.distance_sq(pos) > reach * reach {
            if !ctx.info().is_some_and(|i| i.is_mobile()) {
                return Step::Complete;
            }
            return Step::Prefix(Activity::move_within(aim, range).pursuing(self.target));
        }

        if ctx.tick < self.ready_at {
            return Step::Continue;
        }
        let spread = ctx.rng.gen_range(-MAX_SPREAD..=MAX_SPREAD);
        ctx.emit(Effect::Fire { attacker: ctx.actor, target: self.target, spread });
        self.ready_at = ctx.tick + ctx.config.attack_cooldown_ticks as u64;
        Step::Continue
    }
}
