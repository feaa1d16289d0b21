//! `ActivityStack` — one actor's chain head plus bookkeeping.

use ls_reserve::ReservationHandle;

use crate::{Activity, Target, TickContext};

/// How the most recent chain ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Canceled,
}

#[derive(Debug, Default)]
pub struct ActivityStack {
    head:         Option<Box<Activity>>,
    last_outcome: Option<Outcome>,
    /// Claims held by successors dropped on cancel; released on the next
    /// tick.
    orphaned:     Vec<ReservationHandle>,
}

impl ActivityStack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn current(&self) -> Option<&Activity> {
        self.head.as_deref()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.head.is_none()
    }

    /// Number of nodes in the chain.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.is_idle()
    }

    /// Every pending node, head first.
    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.head.iter().flat_map(|h| h.iter())
    }

    /// Targets the chain intends to interact with, head first.  Lazy and
    /// read-only: walking it never advances or alters the chain.
    pub fn targets(&self) -> impl Iterator<Item = Target> + '_ {
        self.iter().map(|a| a.kind.target()).filter(|t| !t.is_none())
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// Advance the head by one tick.  Returns `false` if the actor was idle.
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) -> bool {
        for h in self.orphaned.drain(..) {
            ctx.reservations.release(h);
        }
        let Some(head) = self.head.take() else {
            return false;
        };
        let canceled = head.is_canceled();
        self.head = head.tick(ctx);
        if self.head.is_none() {
            self.last_outcome = Some(if canceled { Outcome::Canceled } else { Outcome::Completed });
        }
        true
    }

    /// Append `activity` after the whole current chain.
    pub fn queue(&mut self, activity: Box<Activity>) {
        match self.head {
            Some(ref mut head) => head.queue(activity),
            None => self.head = Some(activity),
        }
    }

    /// Cancel everything and run `activity` instead.
    ///
    /// If the head refuses cancellation the chain is left intact and
    /// `activity` is appended after it; returns `false` in that case.
    pub fn replace(&mut self, activity: Box<Activity>) -> bool {
        let accepted = self.cancel();
        self.queue(activity);
        accepted
    }

    /// Cancel the head only; its successors still run.  Returns `false` if
    /// the head refused.  An idle stack has nothing to refuse.
    pub fn cancel_current(&mut self) -> bool {
        match self.head {
            Some(ref mut head) => {
                let accepted = head.cancel();
                if !accepted {
                    log::debug!("cancel refused by {}", head.kind.name());
                }
                accepted
            }
            None => true,
        }
    }

    /// Cancel the head and, if it accepts, drop every successor.
    pub fn cancel(&mut self) -> bool {
        if !self.cancel_current() {
            return false;
        }
        if let Some(rest) = self.head.as_mut().and_then(|h| h.take_successors()) {
            self.orphaned
                .extend(rest.iter().filter_map(|a| a.kind.held_reservation()));
        }
        true
    }

    /// Drop the chain without running any of it (the actor left the world).
    pub fn clear(&mut self) {
        self.head = None;
        self.orphaned.clear();
    }
}
