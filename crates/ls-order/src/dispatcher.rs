//! `Dispatcher` — picks a targeter and applies the resulting chain.

use ls_core::{ActorId, Cell};

use crate::builtin::{
    AttackTargeter, CaptureTargeter, DockTargeter, EnterTargeter, MoveTargeter, SellTargeter,
    StopTargeter,
};
use crate::{Cursor, Order, OrderContext, OrderError, OrderKind, OrderResult, OrderTargeter};

/// What `issue` did to the subject's stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dispatched {
    /// The old chain was canceled; the new one runs next.
    Replaced,
    /// Queued order: appended after the current chain.
    Appended,
    /// Stop order accepted: the chain was canceled.
    Stopped,
    /// The current activity refused cancellation.  An immediate order's
    /// chain was appended after it instead; a stop did nothing.
    Refused,
}

/// Ordered set of targeters.
///
/// Kept sorted by priority, highest first; the sort is stable so equal
/// priorities keep registration order.
pub struct Dispatcher {
    targeters: Vec<Box<dyn OrderTargeter>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Dispatcher {
    /// A dispatcher with no targeters.
    pub fn empty() -> Self {
        Self { targeters: Vec::new() }
    }

    /// The stock targeters.
    pub fn with_defaults() -> Self {
        let mut d = Self::empty();
        d.register(Box::new(MoveTargeter));
        d.register(Box::new(EnterTargeter));
        d.register(Box::new(DockTargeter));
        d.register(Box::new(CaptureTargeter));
        d.register(Box::new(AttackTargeter));
        d.register(Box::new(SellTargeter));
        d.register(Box::new(StopTargeter));
        d
    }

    pub fn register(&mut self, targeter: Box<dyn OrderTargeter>) {
        self.targeters.push(targeter);
        self.targeters.sort_by_key(|t| std::cmp::Reverse(t.priority()));
    }

    /// All targeters, highest priority first.
    pub fn targeters(&self) -> impl Iterator<Item = &dyn OrderTargeter> {
        self.targeters.iter().map(|t| t.as_ref())
    }

    /// Highest-priority targeter for `kind`.
    pub fn targeter(&self, kind: OrderKind) -> Option<&dyn OrderTargeter> {
        self.targeters().find(|t| t.kind() == kind)
    }

    /// Targeters that apply to `subject` at all, highest priority first.
    pub fn targeters_for<'s>(
        &'s self,
        subject: ActorId,
        ctx:     &'s OrderContext<'_>,
    ) -> impl Iterator<Item = &'s dyn OrderTargeter> {
        self.targeters().filter(move |t| t.applies_to(subject, ctx))
    }

    /// Cursor to show while hovering `target`, blocked cursors included.
    pub fn cursor_for_actor(&self, subject: ActorId, target: ActorId, ctx: &OrderContext<'_>) -> Option<Cursor> {
        self.targeters_for(subject, ctx)
            .find_map(|t| t.can_target_actor(subject, target, ctx))
    }

    pub fn cursor_for_cell(&self, subject: ActorId, cell: Cell, ctx: &OrderContext<'_>) -> Option<Cursor> {
        self.targeters_for(subject, ctx)
            .find_map(|t| t.can_target_cell(subject, cell, ctx))
    }

    /// The order a click on `target` would give `subject`, if any.
    pub fn order_for_actor(
        &self,
        subject: ActorId,
        target:  ActorId,
        queued:  bool,
        ctx:     &OrderContext<'_>,
    ) -> Option<Order> {
        self.targeters_for(subject, ctx)
            .find(|t| t.can_target_actor(subject, target, ctx).is_some_and(|c| !c.is_blocked()))
            .map(|t| Order::on_actor(t.kind(), subject, target).queued(queued))
    }

    /// The order a click on `cell` would give `subject`, if any.
    pub fn order_for_cell(
        &self,
        subject: ActorId,
        cell:    Cell,
        queued:  bool,
        ctx:     &OrderContext<'_>,
    ) -> Option<Order> {
        self.targeters_for(subject, ctx)
            .find(|t| t.can_target_cell(subject, cell, ctx).is_some_and(|c| !c.is_blocked()))
            .map(|t| Order::at_cell(t.kind(), subject, cell).queued(queued))
    }

    /// Re-check `order` against the current world without changing it.
    pub fn validate(&self, order: &Order, ctx: &OrderContext<'_>) -> OrderResult<&dyn OrderTargeter> {
        let subject = order.subject;
        if !ctx.actors.is_in_world(subject) {
            return Err(OrderError::UnknownSubject(subject));
        }
        let targeter = self.targeter(order.kind).ok_or(OrderError::NoTargeter(order.kind))?;
        let ineligible = OrderError::Ineligible { kind: order.kind, subject };
        if !targeter.applies_to(subject, ctx) {
            return Err(ineligible);
        }
        let cursor = match (order.target_actor, order.target_cell) {
            (Some(a), _) => targeter.can_target_actor(subject, a, ctx),
            (None, Some(c)) => targeter.can_target_cell(subject, c, ctx),
            (None, None) if targeter.can_issue_without_target() => Some(Cursor::Stop),
            (None, None) => return Err(OrderError::MissingTarget(order.kind)),
        };
        match cursor {
            Some(c) if !c.is_blocked() => Ok(targeter),
            _ => Err(ineligible),
        }
    }

    /// Apply `order` to its subject's stack.
    ///
    /// An immediate order cancels the current chain; if the cancel is
    /// accepted, every reservation the subject holds is released before the
    /// new chain is resolved.  Stop is always immediate.
    pub fn issue(&self, order: &Order, ctx: &mut OrderContext<'_>) -> OrderResult<Dispatched> {
        let targeter = match self.validate(order, ctx) {
            Ok(t) => t,
            Err(err) => {
                log::info!("order rejected: {order}: {err}");
                return Err(err);
            }
        };
        let subject = order.subject;
        let Some(stack) = ctx.stacks.get_mut(subject.index()) else {
            return Err(OrderError::UnknownSubject(subject));
        };

        let immediate = !order.queued || order.kind == OrderKind::Stop;
        let accepted = !immediate || stack.cancel();
        if immediate && accepted {
            let freed = ctx.reservations.release_claimant(subject);
            if !freed.is_empty() {
                log::debug!("{subject}: new order released {freed:?}");
            }
        }

        let chain = targeter.resolve(order, ctx)?;
        let outcome = match chain {
            None if accepted => Dispatched::Stopped,
            None => Dispatched::Refused,
            Some(chain) => {
                if let Some(stack) = ctx.stacks.get_mut(subject.index()) {
                    stack.queue(chain);
                }
                match (immediate, accepted) {
                    (false, _)    => Dispatched::Appended,
                    (true, true)  => Dispatched::Replaced,
                    (true, false) => Dispatched::Refused,
                }
            }
        };
        log::debug!("{order}: {outcome:?}");
        Ok(outcome)
    }
}
