//! Docking at a capacity-one service point (refinery, repair pad).
//!
//! The sequence is: pick or validate a dock, reserve it, walk to its dock
//! cell, announce the occupant, sit docked for `dock_ticks`, then clear the
//! occupant and release the claim.  Every wait in between is an explicit
//! `Wait` node in front of this one, so the tick never blocks.

use ls_core::ActorId;
use ls_reserve::{ReservationHandle, ReserveError};

use super::Step;
use crate::{Action, Activity, TickContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dock {
    /// `None` until a dock has been chosen.
    pub dock:   Option<ActorId>,
    handle:     Option<ReservationHandle>,
    /// Docked ticks left; `None` until docked.
    remaining:  Option<u32>,
    approached: bool,
    /// The dock was picked by `find_dock`, not given by the order.
    chosen:     bool,
}

impl Dock {
    pub fn new(dock: Option<ActorId>) -> Self {
        Self { dock, handle: None, remaining: None, approached: false, chosen: false }
    }

    /// `true` once the actor has settled on the dock cell.  A started dock
    /// refuses cancellation.
    pub fn is_started(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn handle(&self) -> Option<ReservationHandle> {
        self.handle
    }

    fn release(&mut self, ctx: &mut TickContext<'_>) {
        if let Some(h) = self.handle.take() {
            ctx.reservations.release(h);
        }
    }

    /// Nearest friendly dock that is free (or already ours), ties to the
    /// lower id.
    fn find_dock(ctx: &TickContext<'_>) -> Option<ActorId> {
        let me = ctx.actor;
        let pos = ctx.position()?;
        ctx.actors
            .live_ids()
            .filter(|&d| d != me && ctx.actors.same_owner(me, d))
            .filter(|&d| ctx.reservations.holder(d).is_none_or(|h| h == me))
            .filter_map(|d| ctx.dock_cell(d).map(|c| (c.distance_sq(pos), d)))
            .min()
            .map(|(_, d)| d)
    }

    pub(crate) fn tick(&mut self, ctx: &mut TickContext<'_>) -> Step {
        let me = ctx.actor;

        if let Some(remaining) = self.remaining {
            if remaining > 1 {
                self.remaining = Some(remaining - 1);
                return Step::Continue;
            }
            self.remaining = Some(0);
            let Some(dock) = self.dock else { return Step::Complete };
            let undock = Activity::call_uninterruptible(Action::SetDockOccupant { dock, occupant: None });
            return match self.handle.take() {
                Some(h) => Step::CompleteWith(undock.then(Activity::call(Action::Release(h)))),
                None => Step::CompleteWith(undock),
            };
        }

        let dock = match self.dock {
            Some(d) => d,
            None => match Self::find_dock(ctx) {
                Some(d) => {
                    log::debug!("{me}: chose dock {d}");
                    self.dock = Some(d);
                    self.chosen = true;
                    d
                }
                None => {
                    log::debug!("{me}: no free dock, waiting {} ticks", ctx.config.dock_retry_ticks);
                    return Step::Prefix(Activity::wait(ctx.config.dock_retry_ticks));
                }
            },
        };

        if !ctx.actors.same_owner(me, dock) {
            self.release(ctx);
            return Step::Complete;
        }
        let Some(dock_cell) = ctx.dock_cell(dock) else {
            return Step::Complete;
        };

        if !self.handle.is_some_and(|h| ctx.reservations.is_live(h)) {
            match ctx.reservations.reserve(dock, me) {
                Ok(h) => self.handle = Some(h),
                Err(ReserveError::AlreadyHeld { holder, .. }) => {
                    log::debug!("{me}: dock {dock} held by {holder}, waiting");
                    if self.chosen {
                        // Choose again after the wait; another dock may be free.
                        self.dock = None;
                        self.handle = None;
                        self.approached = false;
                    }
                    return Step::Prefix(Activity::wait(ctx.config.dock_retry_ticks));
                }
                Err(err) => {
                    log::debug!("{me}: {err}");
                    return Step::Complete;
                }
            }
        }

        if ctx.position() != Some(dock_cell) {
            if self.approached {
                log::debug!("{me}: could not reach dock {dock}");
                self.release(ctx);
                return Step::Complete;
            }
            self.approached = true;
            return Step::Prefix(Activity::move_to(dock_cell).pursuing(dock));
        }

        self.remaining = Some(ctx.config.dock_ticks.max(1));
        Step::Prefix(Activity::call_uninterruptible(Action::SetDockOccupant {
            dock,
            occupant: Some(me),
        }))
    }
}
