//! The stock targeters.
//!
//! | Targeter          | Kind    | Priority | Target              |
//! |-------------------|---------|----------|---------------------|
//! | `AttackTargeter`  | attack  | 7        | hostile actor       |
//! | `CaptureTargeter` | capture | 6        | hostile capturable  |
//! | `EnterTargeter`   | enter   | 5        | friendly free dock  |
//! | `DockTargeter`    | dock    | 5        | friendly dock       |
//! | `MoveTargeter`    | move    | 4        | cell                |
//! | `SellTargeter`    | sell    | 1        | self                |
//! | `StopTargeter`    | stop    | 0        | none                |

use ls_activity::{Action, Activity};
use ls_core::{ActorId, Cell};
use ls_reserve::ReserveError;

use crate::{Cursor, Order, OrderContext, OrderError, OrderKind, OrderResult, OrderTargeter};

fn target_actor(order: &Order) -> OrderResult<ActorId> {
    order.target_actor.ok_or(OrderError::MissingTarget(order.kind))
}

fn target_cell(order: &Order) -> OrderResult<Cell> {
    order.target_cell.ok_or(OrderError::MissingTarget(order.kind))
}

// ── Move ──────────────────────────────────────────────────────────────────────

pub struct MoveTargeter;

impl OrderTargeter for MoveTargeter {
    fn kind(&self) -> OrderKind {
        OrderKind::Move
    }

    fn priority(&self) -> i32 {
        4
    }

    fn applies_to(&self, subject: ActorId, ctx: &OrderContext<'_>) -> bool {
        ctx.info(subject).is_some_and(|i| i.is_mobile())
    }

    fn can_target_cell(&self, subject: ActorId, cell: Cell, ctx: &OrderContext<'_>) -> Option<Cursor> {
        let mover = ctx.info(subject)?.mover.as_ref()?;
        if !ctx.grid.in_bounds(cell) {
            return None;
        }
        Some(if ctx.grid.is_passable(cell, mover) { Cursor::Move } else { Cursor::MoveBlocked })
    }

    fn resolve(&self, order: &Order, _ctx: &mut OrderContext<'_>) -> OrderResult<Option<Box<Activity>>> {
        Ok(Some(Activity::move_to(target_cell(order)?)))
    }
}

// ── Enter ─────────────────────────────────────────────────────────────────────

/// Send a non-harvesting unit onto a friendly service building.  The
/// building is reserved when the order resolves and released once the unit
/// is inside.
pub struct EnterTargeter;

impl OrderTargeter for EnterTargeter {
    fn kind(&self) -> OrderKind {
        OrderKind::Enter
    }

    fn priority(&self) -> i32 {
        5
    }

    fn applies_to(&self, subject: ActorId, ctx: &OrderContext<'_>) -> bool {
        ctx.info(subject).is_some_and(|i| i.is_mobile() && !i.harvester)
    }

    fn can_target_actor(&self, subject: ActorId, target: ActorId, ctx: &OrderContext<'_>) -> Option<Cursor> {
        if !ctx.is_friendly(subject, target) || !ctx.info(target)?.has_dock() {
            return None;
        }
        match ctx.reservations.holder(target) {
            Some(h) if h != subject => Some(Cursor::EnterBlocked),
            _ => Some(Cursor::Enter),
        }
    }

    fn resolve(&self, order: &Order, ctx: &mut OrderContext<'_>) -> OrderResult<Option<Box<Activity>>> {
        let target = target_actor(order)?;
        let enter = Activity::enter(target);
        match ctx.reservations.reserve(target, order.subject) {
            Ok(h) => Ok(Some(enter.then(Activity::call(Action::Release(h))))),
            // Still held from an earlier queued enter; that chain releases it.
            Err(ReserveError::AlreadyHeld { holder, .. }) if holder == order.subject => Ok(Some(enter)),
            Err(err) => Err(err.into()),
        }
    }
}

// ── Dock ──────────────────────────────────────────────────────────────────────

/// Harvesters only: unload at a friendly dock, then return to where the
/// order found them.
pub struct DockTargeter;

impl OrderTargeter for DockTargeter {
    fn kind(&self) -> OrderKind {
        OrderKind::Dock
    }

    fn priority(&self) -> i32 {
        5
    }

    fn applies_to(&self, subject: ActorId, ctx: &OrderContext<'_>) -> bool {
        ctx.info(subject).is_some_and(|i| i.is_mobile() && i.harvester)
    }

    fn can_target_actor(&self, subject: ActorId, target: ActorId, ctx: &OrderContext<'_>) -> Option<Cursor> {
        (ctx.is_friendly(subject, target) && ctx.info(target)?.has_dock()).then_some(Cursor::Enter)
    }

    fn resolve(&self, order: &Order, ctx: &mut OrderContext<'_>) -> OrderResult<Option<Box<Activity>>> {
        let dock = Activity::dock(Some(target_actor(order)?));
        Ok(Some(match ctx.actors.position(order.subject) {
            Some(home) => dock.then(Activity::move_to(home)),
            None => dock,
        }))
    }
}

// ── Capture ───────────────────────────────────────────────────────────────────

pub struct CaptureTargeter;

impl OrderTargeter for CaptureTargeter {
    fn kind(&self) -> OrderKind {
        OrderKind::Capture
    }

    fn priority(&self) -> i32 {
        6
    }

    fn applies_to(&self, subject: ActorId, ctx: &OrderContext<'_>) -> bool {
        ctx.info(subject).is_some_and(|i| i.can_capture && i.is_mobile())
    }

    fn can_target_actor(&self, subject: ActorId, target: ActorId, ctx: &OrderContext<'_>) -> Option<Cursor> {
        (ctx.is_hostile(subject, target) && ctx.info(target)?.capturable).then_some(Cursor::Capture)
    }

    fn resolve(&self, order: &Order, _ctx: &mut OrderContext<'_>) -> OrderResult<Option<Box<Activity>>> {
        let target = target_actor(order)?;
        Ok(Some(Activity::enter(target).then(Activity::capture(target))))
    }
}

// ── Attack ────────────────────────────────────────────────────────────────────

pub struct AttackTargeter;

impl OrderTargeter for AttackTargeter {
    fn kind(&self) -> OrderKind {
        OrderKind::Attack
    }

    fn priority(&self) -> i32 {
        7
    }

    fn applies_to(&self, subject: ActorId, ctx: &OrderContext<'_>) -> bool {
        ctx.info(subject).is_some_and(|i| i.attack_range.is_some())
    }

    fn can_target_actor(&self, subject: ActorId, target: ActorId, ctx: &OrderContext<'_>) -> Option<Cursor> {
        ctx.is_hostile(subject, target).then_some(Cursor::Attack)
    }

    fn resolve(&self, order: &Order, _ctx: &mut OrderContext<'_>) -> OrderResult<Option<Box<Activity>>> {
        Ok(Some(Activity::attack(target_actor(order)?)))
    }
}

// ── Sell ──────────────────────────────────────────────────────────────────────

pub struct SellTargeter;

impl OrderTargeter for SellTargeter {
    fn kind(&self) -> OrderKind {
        OrderKind::Sell
    }

    fn priority(&self) -> i32 {
        1
    }

    fn applies_to(&self, subject: ActorId, ctx: &OrderContext<'_>) -> bool {
        ctx.info(subject).is_some_and(|i| i.sellable)
    }

    fn can_target_actor(&self, subject: ActorId, target: ActorId, _ctx: &OrderContext<'_>) -> Option<Cursor> {
        (subject == target).then_some(Cursor::Sell)
    }

    fn can_issue_without_target(&self) -> bool {
        true
    }

    fn resolve(&self, _order: &Order, _ctx: &mut OrderContext<'_>) -> OrderResult<Option<Box<Activity>>> {
        Ok(Some(Activity::sell()))
    }
}

// ── Stop ──────────────────────────────────────────────────────────────────────

pub struct StopTargeter;

impl OrderTargeter for StopTargeter {
    fn kind(&self) -> OrderKind {
        OrderKind::Stop
    }

    fn priority(&self) -> i32 {
        0
    }

    fn applies_to(&self, subject: ActorId, ctx: &OrderContext<'_>) -> bool {
        ctx.actors.is_in_world(subject)
    }

    fn can_issue_without_target(&self) -> bool {
        true
    }

    fn resolve(&self, _order: &Order, _ctx: &mut OrderContext<'_>) -> OrderResult<Option<Box<Activity>>> {
        Ok(None)
    }
}
