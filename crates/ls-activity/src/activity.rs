//! The activity node and its composition primitives.

use ls_core::{ActorId, Cell};
use ls_grid::Route;
use ls_reserve::ReservationHandle;

use crate::kinds::{Attack, CallFunc, Capture, Dock, Enter, Move, MoveAdjacentTo, Sell, Step, Wait};
use crate::{Action, Target, TickContext};

// ── ActivityKind ──────────────────────────────────────────────────────────────

/// The closed set of behaviours an actor can schedule.
#[derive(Debug)]
pub enum ActivityKind {
    Wait(Wait),
    CallFunc(CallFunc),
    Move(Move),
    MoveAdjacentTo(MoveAdjacentTo),
    Enter(Enter),
    Dock(Dock),
    Sell(Sell),
    Capture(Capture),
    Attack(Attack),
}

impl ActivityKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActivityKind::Wait(_)           => "wait",
            ActivityKind::CallFunc(_)       => "call",
            ActivityKind::Move(_)           => "move",
            ActivityKind::MoveAdjacentTo(_) => "move-adjacent",
            ActivityKind::Enter(_)          => "enter",
            ActivityKind::Dock(_)           => "dock",
            ActivityKind::Sell(_)           => "sell",
            ActivityKind::Capture(_)        => "capture",
            ActivityKind::Attack(_)         => "attack",
        }
    }

    /// What this behaviour is heading for or acting on.
    pub fn target(&self) -> Target {
        match self {
            ActivityKind::Move(m)           => Target::Cell(m.destination),
            ActivityKind::MoveAdjacentTo(m) => Target::Actor(m.target),
            ActivityKind::Enter(e)          => Target::Actor(e.target),
            ActivityKind::Capture(c)        => Target::Actor(c.target),
            ActivityKind::Attack(a)         => Target::Actor(a.target),
            ActivityKind::Dock(d)           => d.dock.map_or(Target::None, Target::Actor),
            ActivityKind::Wait(_) | ActivityKind::CallFunc(_) | ActivityKind::Sell(_) => Target::None,
        }
    }

    /// Actor that must still be in the world for this behaviour to run.
    fn referenced_actor(&self) -> Option<ActorId> {
        match self {
            ActivityKind::CallFunc(c) => c.action.as_ref().and_then(Action::referenced_actor),
            ActivityKind::Move(m)     => m.pursuing,
            _ => self.target().actor(),
        }
    }

    /// Reservation this node is responsible for releasing.
    pub fn held_reservation(&self) -> Option<ReservationHandle> {
        match self {
            ActivityKind::Dock(d) => d.handle(),
            ActivityKind::CallFunc(CallFunc { action: Some(Action::Release(h)), .. }) => Some(*h),
            _ => None,
        }
    }

    /// Whether a cancellation request would be accepted right now.
    pub fn can_cancel(&self) -> bool {
        match self {
            ActivityKind::CallFunc(c) => c.interruptible,
            ActivityKind::Sell(_)     => false,
            ActivityKind::Capture(c)  => !c.is_committed(),
            ActivityKind::Dock(d)     => !d.is_started(),
            _ => true,
        }
    }
}

// ── Activity ──────────────────────────────────────────────────────────────────

/// One node of an actor's activity chain.
#[derive(Debug)]
pub struct Activity {
    pub kind: ActivityKind,
    next:     Option<Box<Activity>>,
    canceled: bool,
}

impl Activity {
    pub fn new(kind: ActivityKind) -> Box<Activity> {
        Box::new(Activity { kind, next: None, canceled: false })
    }

    // ── Constructors ──────────────────────────────────────────────────────

    /// Occupy the actor for `ticks` ticks (at least one).
    pub fn wait(ticks: u32) -> Box<Activity> {
        Self::new(ActivityKind::Wait(Wait::new(ticks)))
    }

    pub fn call(action: Action) -> Box<Activity> {
        Self::new(ActivityKind::CallFunc(CallFunc::new(action, true)))
    }

    /// A callback that refuses cancellation.
    pub fn call_uninterruptible(action: Action) -> Box<Activity> {
        Self::new(ActivityKind::CallFunc(CallFunc::new(action, false)))
    }

    pub fn move_to(destination: Cell) -> Box<Activity> {
        Self::new(ActivityKind::Move(Move::new(destination, 0)))
    }

    /// Move until within `range` cells (Euclidean) of `destination`.
    pub fn move_within(destination: Cell, range: u32) -> Box<Activity> {
        Self::new(ActivityKind::Move(Move::new(destination, range)))
    }

    /// Walk a route that has already been searched.
    pub fn follow(route: Route) -> Box<Activity> {
        Self::new(ActivityKind::Move(Move::along(route)))
    }

    /// Tie a move to the actor it is closing on: the move ends as soon as
    /// `target` leaves the world.  Other kinds are returned unchanged.
    pub fn pursuing(mut self: Box<Self>, target: ActorId) -> Box<Activity> {
        if let ActivityKind::Move(m) = &mut self.kind {
            m.pursuing = Some(target);
        }
        self
    }

    pub fn move_adjacent_to(target: ActorId) -> Box<Activity> {
        Self::new(ActivityKind::MoveAdjacentTo(MoveAdjacentTo::new(target)))
    }

    pub fn enter(target: ActorId) -> Box<Activity> {
        Self::new(ActivityKind::Enter(Enter::new(target)))
    }

    /// Dock at `dock`, or at the nearest free friendly dock when `None`.
    pub fn dock(dock: Option<ActorId>) -> Box<Activity> {
        Self::new(ActivityKind::Dock(Dock::new(dock)))
    }

    pub fn sell() -> Box<Activity> {
        Self::new(ActivityKind::Sell(Sell::default()))
    }

    pub fn capture(target: ActorId) -> Box<Activity> {
        Self::new(ActivityKind::Capture(Capture::new(target)))
    }

    pub fn attack(target: ActorId) -> Box<Activity> {
        Self::new(ActivityKind::Attack(Attack::new(target)))
    }

    // ── Composition ───────────────────────────────────────────────────────

    /// Append `next` after the last node of this chain.  Existing successors
    /// are kept.
    pub fn queue(&mut self, next: Box<Activity>) {
        match self.next {
            Some(ref mut n) => n.queue(next),
            None => self.next = Some(next),
        }
    }

    /// `self`, then `next` (and whatever follows either).
    pub fn then(mut self: Box<Self>, next: Box<Activity>) -> Box<Activity> {
        self.queue(next);
        self
    }

    /// Link activities in order.  `None` for an empty iterator.
    pub fn sequence(activities: impl IntoIterator<Item = Box<Activity>>) -> Option<Box<Activity>> {
        let mut items: Vec<Box<Activity>> = activities.into_iter().collect();
        let mut chain: Option<Box<Activity>> = None;
        while let Some(mut a) = items.pop() {
            if let Some(rest) = chain.take() {
                a.queue(rest);
            }
            chain = Some(a);
        }
        chain
    }

    #[inline]
    pub fn next(&self) -> Option<&Activity> {
        self.next.as_deref()
    }

    pub(crate) fn take_successors(&mut self) -> Option<Box<Activity>> {
        self.next.take()
    }

    /// This node and all its successors, head first.
    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        std::iter::successors(Some(self), |a| a.next.as_deref())
    }

    // ── Cancellation ──────────────────────────────────────────────────────

    #[inline]
    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    /// Ask this node to stop.  Returns `false` (and changes nothing) when
    /// the behaviour refuses.  An accepted cancellation takes effect on the
    /// node's next tick, which hands over to the successor.
    pub fn cancel(&mut self) -> bool {
        if !self.kind.can_cancel() {
            return false;
        }
        self.canceled = true;
        true
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance this node by one tick and return the chain's new head.
    ///
    /// A canceled node, or one whose referenced actor has left the world,
    /// completes immediately without running its behaviour.
    pub fn tick(mut self: Box<Self>, ctx: &mut TickContext<'_>) -> Option<Box<Activity>> {
        let stale = self
            .kind
            .referenced_actor()
            .is_some_and(|a| !ctx.actors.is_in_world(a));
        if self.canceled || stale || !ctx.actors.is_in_world(ctx.actor) {
            self.abort(ctx);
            return self.next.take();
        }

        let step = match &mut self.kind {
            ActivityKind::Wait(w)           => w.tick(),
            ActivityKind::CallFunc(c)       => c.tick(ctx),
            ActivityKind::Move(m)           => m.tick(ctx),
            ActivityKind::MoveAdjacentTo(m) => m.tick(ctx),
            ActivityKind::Enter(e)          => e.tick(ctx),
            ActivityKind::Dock(d)           => d.tick(ctx),
            ActivityKind::Sell(s)           => s.tick(ctx),
            ActivityKind::Capture(c)        => c.tick(ctx),
            ActivityKind::Attack(a)         => a.tick(ctx),
        };

        match step {
            Step::Continue => Some(self),
            Step::Complete => self.next.take(),
            Step::Prefix(first) => Some(first.then(self)),
            Step::CompleteWith(chain) => match self.next.take() {
                Some(rest) => Some(chain.then(rest)),
                None => Some(chain),
            },
        }
    }

    /// Give back anything a behaviour holds when it ends without finishing.
    fn abort(&mut self, ctx: &mut TickContext<'_>) {
        if let Some(h) = self.kind.held_reservation() {
            ctx.reservations.release(h);
        }
    }
}
