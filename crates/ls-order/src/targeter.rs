//! The `OrderTargeter` trait — one per order kind.

use ls_activity::{Activity, ActivityStack};
use ls_actor::{ActorInfo, ActorRules, ActorStore};
use ls_core::{ActorId, Cell};
use ls_grid::Grid;
use ls_reserve::ReservationRegistry;

use crate::{Cursor, Order, OrderKind, OrderResult};

/// World state visible to targeters and the dispatcher.
///
/// Targeting reads it through `&OrderContext`; issuing needs `&mut` for
/// the subject's stack and for reservations taken while resolving.
pub struct OrderContext<'a> {
    pub grid:         &'a Grid,
    pub rules:        &'a ActorRules,
    pub actors:       &'a ActorStore,
    pub reservations: &'a mut ReservationRegistry,
    /// Indexed by `ActorId`.
    pub stacks:       &'a mut [ActivityStack],
}

impl<'a> OrderContext<'a> {
    pub fn info(&self, actor: ActorId) -> Option<&'a ActorInfo> {
        let rules: &'a ActorRules = self.rules;
        self.actors.kind_of(actor).and_then(|k| rules.get(k))
    }

    /// `true` for an in-world actor other than `subject` that `subject`'s
    /// player does not own.
    pub fn is_hostile(&self, subject: ActorId, target: ActorId) -> bool {
        target != subject
            && self.actors.is_in_world(target)
            && !self.actors.same_owner(subject, target)
    }

    /// `true` for an in-world actor other than `subject` owned by the same
    /// player.
    pub fn is_friendly(&self, subject: ActorId, target: ActorId) -> bool {
        target != subject
            && self.actors.is_in_world(target)
            && self.actors.same_owner(subject, target)
    }
}

/// Decides whether one kind of order fits a subject and target, and turns an
/// accepted order into activities.
///
/// Targeting methods return `None` when the order does not fit and a
/// [`Cursor`] otherwise.  A blocked cursor means "recognised, but not now".
pub trait OrderTargeter {
    fn kind(&self) -> OrderKind;

    /// Higher wins when several targeters fit the same input.
    fn priority(&self) -> i32;

    /// Whether `subject` can receive this order at all.
    fn applies_to(&self, subject: ActorId, ctx: &OrderContext<'_>) -> bool;

    fn can_target_actor(
        &self,
        _subject: ActorId,
        _target:  ActorId,
        _ctx:     &OrderContext<'_>,
    ) -> Option<Cursor> {
        None
    }

    fn can_target_cell(
        &self,
        _subject: ActorId,
        _cell:    Cell,
        _ctx:     &OrderContext<'_>,
    ) -> Option<Cursor> {
        None
    }

    /// Self-targeted orders (sell, stop) need no actor or cell.
    fn can_issue_without_target(&self) -> bool {
        false
    }

    /// Build the activity chain for an order already checked by the
    /// dispatcher.  `None` means "stop": no new work.
    fn resolve(&self, order: &Order, ctx: &mut OrderContext<'_>) -> OrderResult<Option<Box<Activity>>>;
}
