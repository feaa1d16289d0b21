use super::Step;
use crate::{Effect, TickContext};

/// Counts down `sell_ticks`, then removes the actor.  Never cancelable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Sell {
    /// `None` until the sale starts.
    pub remaining: Option<u32>,
}

impl Sell {
    pub fn is_started(&self) -> bool {
        self.remaining.is_some()
    }

    pub(crate) fn tick(&mut self, ctx: &mut TickContext<'_>) -> Step {
        let remaining = match self.remaining {
            Some(r) => r,
            None => {
                if !ctx.info().is_some_and(|i| i.sellable) {
                    log::debug!("{}: not sellable", ctx.actor);
                    return Step::Complete;
                }
                log::debug!("{}: selling", ctx.actor);
                ctx.config.sell_ticks
            }
        };
        if remaining > 1 {
            self.remaining = Some(remaining - 1);
            return Step::Continue;
        }
        self.remaining = Some(0);
        ctx.emit(Effect::Destroy(ctx.actor));
        Step::Complete
    }
}
