use ls_core::ActorId;

use super::Step;
use crate::{Action, Effect, TickContext};

/// Runs one [`Action`] on its first tick, then completes.
///
/// When not `interruptible`, cancellation is refused until it has run.  An
/// accepted cancellation drops the action unrun.
#[derive(Debug)]
pub struct CallFunc {
    /// `None` once run.
    pub action:        Option<Action>,
    pub interruptible: bool,
}

impl CallFunc {
    pub fn new(action: Action, interruptible: bool) -> Self {
        Self { action: Some(action), interruptible }
    }

    pub(crate) fn tick(&mut self, ctx: &mut TickContext<'_>) -> Step {
        let Some(action) = self.action.take() else {
            return Step::Complete;
        };
        let actor: ActorId = ctx.actor;
        match action {
            Action::Signal(code) => ctx.emit(Effect::Signal { actor, code }),
            Action::Release(handle) => {
                if !ctx.reservations.release(handle) {
                    log::debug!("{actor}: reservation on {} already gone", handle.target);
                }
            }
            Action::SetDockOccupant { dock, occupant } => {
                ctx.emit(Effect::DockOccupant { dock, occupant });
            }
            Action::Queue(chain) => return Step::CompleteWith(chain),
            Action::Effect(effect) => ctx.emit(effect),
        }
        Step::Complete
    }
}
