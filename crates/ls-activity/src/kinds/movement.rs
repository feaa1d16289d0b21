//! Movement behaviours: `Move`, `MoveAdjacentTo`, `Enter`.
//!
//! All searches run in blocked mode with the mover itself ignored, so an
//! actor never plans through a cell another actor is standing on.  A failed
//! search is not an error: the mover waits `path_retry_ticks` and tries
//! again, up to `path_retry_limit` times in a row, then gives the move up.

use ls_core::{ActorId, Cell};
use ls_grid::{GridError, GridResult, MoverProfile, Occupancy, PathSearch, Route, find_bidi_path};

use super::Step;
use crate::{Activity, TickContext};

/// Shared wait-and-retry policy for failed searches.
fn retry_or_abandon(retries: &mut u32, ctx: &TickContext<'_>, what: &str, err: GridError) -> Step {
    *retries += 1;
    if *retries > ctx.config.path_retry_limit {
        log::debug!("{}: {what} abandoned after {} attempts ({err})", ctx.actor, *retries);
        return Step::Complete;
    }
    log::debug!(
        "{}: {what} failed ({err}), retry {}/{} in {} ticks",
        ctx.actor,
        *retries,
        ctx.config.path_retry_limit,
        ctx.config.path_retry_ticks,
    );
    Step::Prefix(Activity::wait(ctx.config.path_retry_ticks))
}

fn mover_profile<'a>(ctx: &TickContext<'a>) -> Option<&'a MoverProfile> {
    ctx.info().and_then(|i| i.mover.as_ref())
}

// ── Move ──────────────────────────────────────────────────────────────────────

/// Walk one cell per tick toward `destination`, stopping once within
/// `near_enough` cells of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub destination: Cell,
    pub near_enough: u32,
    /// Actor this move is an approach to, if any.
    pub pursuing:    Option<ActorId>,
    /// Remaining steps, next step last.
    path:    Vec<Cell>,
    retries: u32,
}

impl Move {
    pub fn new(destination: Cell, near_enough: u32) -> Self {
        Self { destination, near_enough, pursuing: None, path: Vec::new(), retries: 0 }
    }

    /// Follow a pre-searched route to its goal.
    pub fn along(route: Route) -> Self {
        let destination = route.goal();
        let path = route.without_start().iter().rev().copied().collect();
        Self { destination, near_enough: 0, pursuing: None, path, retries: 0 }
    }

    /// Cells still to walk, next step first.
    pub fn remaining_path(&self) -> impl Iterator<Item = Cell> + '_ {
        self.path.iter().rev().copied()
    }

    fn arrived(&self, pos: Cell) -> bool {
        let r = self.near_enough as i64;
        pos.distance_sq(self.destination) <= r * r
    }

    fn plan(&self, ctx: &TickContext<'_>, profile: &MoverProfile, from: Cell) -> GridResult<Route> {
        let view = ctx.actors.occupancy_for(ctx.actor);
        let dest = self.destination;
        let r = self.near_enough as i64;
        PathSearch::from_cell(ctx.grid, profile, from)
            .toward([dest])
            .goal(move |c: Cell| c.distance_sq(dest) <= r * r)
            .check_blocked(&view)
            .find_path()
    }

    pub(crate) fn tick(&mut self, ctx: &mut TickContext<'_>) -> Step {
        let (Some(profile), Some(pos)) = (mover_profile(ctx), ctx.position()) else {
            return Step::Complete;
        };
        if self.arrived(pos) {
            return Step::Complete;
        }

        let needs_plan = match self.path.last() {
            None => true,
            Some(&next) => !ctx.grid.are_neighbors(pos, next) || ctx.actors.blocks(next, ctx.actor),
        };
        if needs_plan {
            match self.plan(ctx, profile, pos) {
                Ok(route) => {
                    self.retries = 0;
                    self.path = route.without_start().iter().rev().copied().collect();
                }
                Err(err) => return retry_or_abandon(&mut self.retries, ctx, "move", err),
            }
        }

        let Some(next) = self.path.pop() else {
            return Step::Complete;
        };
        if ctx.actors.move_to(ctx.actor, next).is_err() {
            return Step::Complete;
        }
        if self.arrived(next) { Step::Complete } else { Step::Continue }
    }
}

// ── MoveAdjacentTo ────────────────────────────────────────────────────────────

/// Get next to (including diagonally) any cell of `target`'s footprint.
///
/// Plans with a bidirectional search: forward from the mover toward the free
/// cells ringing the target, backward from all of those cells at once.  The
/// route is walked by a substituted [`Move`], after which this node checks
/// again (the target may have moved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveAdjacentTo {
    pub target: ActorId,
    retries:    u32,
}

impl MoveAdjacentTo {
    pub fn new(target: ActorId) -> Self {
        Self { target, retries: 0 }
    }

    fn plan(&self, ctx: &TickContext<'_>, profile: &MoverProfile, from: Cell) -> GridResult<Route> {
        let view = ctx.actors.occupancy_for(ctx.actor);
        let goals: Vec<Cell> = ctx
            .actors
            .cells_around(self.target)
            .into_iter()
            .filter(|&c| ctx.grid.is_passable(c, profile) && !view.is_blocked(c))
            .collect();
        if goals.is_empty() {
            return Err(GridError::NoPath { from });
        }

        let mut forward = PathSearch::from_cell(ctx.grid, profile, from)
            .toward(goals.iter().copied())
            .check_blocked(&view);
        let mut backward = PathSearch::from_cells(ctx.grid, profile, goals)
            .reverse()
            .check_blocked(&view);
        find_bidi_path(&mut forward, &mut backward)
    }

    pub(crate) fn tick(&mut self, ctx: &mut TickContext<'_>) -> Step {
        let (Some(profile), Some(pos)) = (mover_profile(ctx), ctx.position()) else {
            return Step::Complete;
        };
        if ctx.actors.is_adjacent_to(self.target, pos) {
            return Step::Complete;
        }
        match self.plan(ctx, profile, pos) {
            Ok(route) if route.is_trivial() => Step::Complete,
            Ok(route) => {
                self.retries = 0;
                Step::Prefix(Activity::follow(route).pursuing(self.target))
            }
            Err(err) => retry_or_abandon(&mut self.retries, ctx, "approach", err),
        }
    }
}

// ── Enter ─────────────────────────────────────────────────────────────────────

/// Approach `target`, then step onto its nearest footprint cell that no
/// other unit occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enter {
    pub target: ActorId,
    approached: bool,
}

impl Enter {
    pub fn new(target: ActorId) -> Self {
        Self { target, approached: false }
    }

    pub(crate) fn tick(&mut self, ctx: &mut TickContext<'_>) -> Step {
        let Some(pos) = ctx.position() else { return Step::Complete };
        if !ctx.actors.is_adjacent_to(self.target, pos) {
            if self.approached {
                log::debug!("{}: could not reach {} to enter", ctx.actor, self.target);
                return Step::Complete;
            }
            self.approached = true;
            return Step::Prefix(Activity::move_adjacent_to(self.target));
        }
        // Nearest footprint cell no other unit already stands on.
        let view = ctx.actors.occupancy_for(ctx.actor).ignoring(self.target);
        let free = ctx
            .actors
            .occupied_cells(self.target)
            .filter(|&c| !view.is_blocked(c))
            .min_by_key(|&c| (c.distance_sq(pos), c));
        match free {
            Some(cell) if cell != pos => {
                if ctx.actors.move_to(ctx.actor, cell).is_err() {
                    log::debug!("{}: could not step onto {}", ctx.actor, self.target);
                }
            }
            Some(_) => {}
            None => log::debug!("{}: no room inside {}", ctx.actor, self.target),
        }
        Step::Complete
    }
}
