use ls_core::ActorId;

use super::Step;
use crate::{Effect, TickContext};

/// Take over `target` while standing on its footprint.
///
/// Once committed the captor spends `capture_ticks` on the target, refusing
/// cancellation, then ownership moves to the captor's player and the captor
/// is consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub target: ActorId,
    /// `None` until committed.
    pub remaining: Option<u32>,
}

impl Capture {
    pub fn new(target: ActorId) -> Self {
        Self { target, remaining: None }
    }

    pub fn is_committed(&self) -> bool {
        self.remaining.is_some()
    }

    pub(crate) fn tick(&mut self, ctx: &mut TickContext<'_>) -> Step {
        let actor = ctx.actor;
        let remaining = match self.remaining {
            Some(r) => r,
            None => {
                let Some(pos) = ctx.position() else { return Step::Complete };
                let capturable = ctx.info_of(self.target).is_some_and(|i| i.capturable);
                let on_target = ctx.actors.occupied_cells(self.target).any(|c| c == pos);
                if !capturable || !on_target || ctx.actors.same_owner(actor, self.target) {
                    return Step::Complete;
                }
                log::debug!("{actor}: committed to capturing {}", self.target);
                ctx.config.capture_ticks
            }
        };
        if remaining > 1 {
            self.remaining = Some(remaining - 1);
            return Step::Continue;
        }
        self.remaining = Some(0);

        match ctx.actors.owner(actor) {
            Some(owner) if !ctx.actors.same_owner(actor, self.target) => {
                ctx.emit(Effect::TransferOwnership { actor: self.target, to: owner });
                ctx.emit(Effect::Destroy(actor));
            }
            _ => {}
        }
        Step::Complete
    }
}
