//! Unit tests for ls-order.

#[cfg(test)]
mod helpers {
    use ls_activity::ActivityStack;
    use ls_actor::{ActorInfo, ActorRules, ActorStore};
    use ls_core::{ActorId, ActorTypeId, Cell, PlayerId};
    use ls_grid::{Connectivity, Grid, GridBuilder, MoverProfile, Terrain};
    use ls_reserve::ReservationRegistry;

    use crate::OrderContext;

    pub struct World {
        pub grid:         Grid,
        pub rules:        ActorRules,
        pub actors:       ActorStore,
        pub reservations: ReservationRegistry,
        pub stacks:       Vec<ActivityStack>,
    }

    pub struct Kinds {
        pub tank:     ActorTypeId,
        pub truck:    ActorTypeId,
        pub engineer: ActorTypeId,
        pub commando: ActorTypeId,
        pub refinery: ActorTypeId,
        pub hq:       ActorTypeId,
    }

    pub fn c(x: i32, y: i32) -> Cell {
        Cell::new(x, y)
    }

    /// 10×10, with a water strip in columns 8–9.
    pub fn world() -> (World, Kinds) {
        let grid = GridBuilder::new(10, 10, Connectivity::Eight)
            .fill_rect(c(8, 0), c(9, 9), Terrain::Water)
            .build()
            .unwrap();
        let mut rules = ActorRules::new();
        let kinds = Kinds {
            tank:     rules.add(ActorInfo::unit("tank", MoverProfile::wheeled()).with_attack_range(4)),
            truck:    rules.add(ActorInfo::unit("truck", MoverProfile::wheeled()).harvester()),
            engineer: rules.add(ActorInfo::unit("engineer", MoverProfile::infantry()).can_capture()),
            commando: rules.add(
                ActorInfo::unit("commando", MoverProfile::infantry())
                    .can_capture()
                    .with_attack_range(3),
            ),
            refinery: rules.add(ActorInfo::building("refinery", 2, 2).with_dock(c(0, 2)).sellable()),
            hq:       rules.add(ActorInfo::building("hq", 2, 2).capturable()),
        };
        let w = World {
            grid,
            rules,
            actors: ActorStore::new(),
            reservations: ReservationRegistry::new(),
            stacks: Vec::new(),
        };
        (w, kinds)
    }

    impl World {
        pub fn spawn(&mut self, kind: ActorTypeId, owner: u8, at: Cell) -> ActorId {
            let info = self.rules.get(kind).unwrap().clone();
            let id = self.actors.spawn(kind, &info, PlayerId(owner), at);
            self.stacks.push(ActivityStack::new());
            id
        }

        pub fn ctx(&mut self) -> OrderContext<'_> {
            OrderContext {
                grid:         &self.grid,
                rules:        &self.rules,
                actors:       &self.actors,
                reservations: &mut self.reservations,
                stacks:       &mut self.stacks,
            }
        }

        pub fn names(&self, actor: ActorId) -> Vec<&'static str> {
            self.stacks[actor.index()].iter().map(|a| a.kind.name()).collect()
        }
    }
}

// ── Targeting ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod targeting {
    use ls_activity::Activity;
    use ls_core::ActorId;

    use super::helpers::{c, world};
    use crate::{Cursor, Dispatcher, Order, OrderContext, OrderKind, OrderResult, OrderTargeter};

    #[test]
    fn defaults_sorted_by_priority() {
        let d = Dispatcher::with_defaults();
        let kinds: Vec<_> = d.targeters().map(|t| (t.kind(), t.priority())).collect();
        assert_eq!(
            kinds,
            vec![
                (OrderKind::Attack, 7),
                (OrderKind::Capture, 6),
                (OrderKind::Enter, 5),
                (OrderKind::Dock, 5),
                (OrderKind::Move, 4),
                (OrderKind::Sell, 1),
                (OrderKind::Stop, 0),
            ]
        );
    }

    #[test]
    fn highest_priority_eligible_wins() {
        let (mut w, k) = world();
        let tank = w.spawn(k.tank, 1, c(0, 0));
        let eng = w.spawn(k.engineer, 1, c(1, 0));
        let cmd = w.spawn(k.commando, 1, c(2, 0));
        let truck = w.spawn(k.truck, 1, c(3, 0));
        let hq = w.spawn(k.hq, 2, c(4, 4));
        let refinery = w.spawn(k.refinery, 1, c(0, 6));
        let ctx = w.ctx();
        let d = Dispatcher::default();
        let kind = |s, t| d.order_for_actor(s, t, false, &ctx).map(|o| o.kind);

        assert_eq!(kind(tank, hq), Some(OrderKind::Attack));
        assert_eq!(kind(eng, hq), Some(OrderKind::Capture));
        assert_eq!(kind(cmd, hq), Some(OrderKind::Attack), "attack outranks capture");
        assert_eq!(kind(truck, hq), None);
        assert_eq!(kind(truck, refinery), Some(OrderKind::Dock));
        assert_eq!(kind(tank, refinery), Some(OrderKind::Enter));
        assert_eq!(kind(refinery, refinery), Some(OrderKind::Sell));
        assert_eq!(kind(hq, hq), None);
    }

    #[test]
    fn order_for_cell_respects_terrain() {
        let (mut w, k) = world();
        let tank = w.spawn(k.tank, 1, c(0, 0));
        let refinery = w.spawn(k.refinery, 1, c(0, 6));
        let ctx = w.ctx();
        let d = Dispatcher::default();

        let order = d.order_for_cell(tank, c(5, 5), true, &ctx).unwrap();
        assert_eq!(order, Order::at_cell(OrderKind::Move, tank, c(5, 5)).queued(true));

        assert_eq!(d.order_for_cell(tank, c(9, 5), false, &ctx), None);
        assert_eq!(d.cursor_for_cell(tank, c(9, 5), &ctx), Some(Cursor::MoveBlocked));
        assert_eq!(d.cursor_for_cell(tank, c(20, 5), &ctx), None);
        assert_eq!(d.order_for_cell(refinery, c(5, 5), false, &ctx), None);
    }

    #[test]
    fn reserved_dock_shows_blocked_enter() {
        let (mut w, k) = world();
        let tank = w.spawn(k.tank, 1, c(0, 0));
        let other = w.spawn(k.tank, 1, c(1, 0));
        let refinery = w.spawn(k.refinery, 1, c(0, 6));
        w.reservations.reserve(refinery, other).unwrap();
        let ctx = w.ctx();
        let d = Dispatcher::default();

        assert_eq!(d.cursor_for_actor(tank, refinery, &ctx), Some(Cursor::EnterBlocked));
        assert_eq!(d.order_for_actor(tank, refinery, false, &ctx), None);
        assert_eq!(d.cursor_for_actor(other, refinery, &ctx), Some(Cursor::Enter));
    }

    #[test]
    fn targeters_for_filters_by_subject() {
        let (mut w, k) = world();
        let truck = w.spawn(k.truck, 1, c(0, 0));
        let refinery = w.spawn(k.refinery, 1, c(0, 6));
        let ctx = w.ctx();
        let d = Dispatcher::default();

        let truck_kinds: Vec<_> = d.targeters_for(truck, &ctx).map(|t| t.kind()).collect();
        assert_eq!(truck_kinds, vec![OrderKind::Dock, OrderKind::Move, OrderKind::Stop]);
        let ref_kinds: Vec<_> = d.targeters_for(refinery, &ctx).map(|t| t.kind()).collect();
        assert_eq!(ref_kinds, vec![OrderKind::Sell, OrderKind::Stop]);
    }

    struct Fixed(OrderKind, i32);

    impl OrderTargeter for Fixed {
        fn kind(&self) -> OrderKind {
            self.0
        }
        fn priority(&self) -> i32 {
            self.1
        }
        fn applies_to(&self, _: ActorId, _: &OrderContext<'_>) -> bool {
            true
        }
        fn can_target_actor(&self, _: ActorId, _: ActorId, _: &OrderContext<'_>) -> Option<Cursor> {
            Some(Cursor::Enter)
        }
        fn resolve(&self, _: &Order, _: &mut OrderContext<'_>) -> OrderResult<Option<Box<Activity>>> {
            Ok(Some(Activity::wait(1)))
        }
    }

    #[test]
    fn equal_priority_goes_to_first_registered() {
        let (mut w, k) = world();
        let a = w.spawn(k.tank, 1, c(0, 0));
        let b = w.spawn(k.tank, 1, c(1, 0));
        let ctx = w.ctx();

        let mut d = Dispatcher::empty();
        d.register(Box::new(Fixed(OrderKind::Dock, 3)));
        d.register(Box::new(Fixed(OrderKind::Enter, 3)));
        d.register(Box::new(Fixed(OrderKind::Capture, 1)));
        assert_eq!(d.order_for_actor(a, b, false, &ctx).map(|o| o.kind), Some(OrderKind::Dock));

        d.register(Box::new(Fixed(OrderKind::Attack, 9)));
        assert_eq!(d.order_for_actor(a, b, false, &ctx).map(|o| o.kind), Some(OrderKind::Attack));
    }
}

// ── Issuing ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod issuing {
    use ls_activity::{Action, Activity, Target};

    use super::helpers::{c, world};
    use crate::{Dispatched, Dispatcher, Order, OrderError, OrderKind};

    #[test]
    fn immediate_order_replaces() {
        let (mut w, k) = world();
        let tank = w.spawn(k.tank, 1, c(0, 0));
        w.stacks[tank.index()].queue(Activity::wait(50));
        w.stacks[tank.index()].queue(Activity::wait(50));
        let d = Dispatcher::default();

        let r = d.issue(&Order::at_cell(OrderKind::Move, tank, c(5, 5)), &mut w.ctx());
        assert_eq!(r, Ok(Dispatched::Replaced));
        assert_eq!(w.names(tank), vec!["wait", "move"]);
        assert!(w.stacks[tank.index()].current().unwrap().is_canceled());
    }

    #[test]
    fn queued_order_appends() {
        let (mut w, k) = world();
        let tank = w.spawn(k.tank, 1, c(0, 0));
        w.stacks[tank.index()].queue(Activity::wait(50));
        let d = Dispatcher::default();

        let order = Order::at_cell(OrderKind::Move, tank, c(5, 5)).queued(true);
        assert_eq!(d.issue(&order, &mut w.ctx()), Ok(Dispatched::Appended));
        assert_eq!(w.names(tank), vec!["wait", "move"]);
        assert!(!w.stacks[tank.index()].current().unwrap().is_canceled());
    }

    #[test]
    fn refused_cancel_appends_instead() {
        let (mut w, k) = world();
        let tank = w.spawn(k.tank, 1, c(0, 0));
        w.stacks[tank.index()].queue(Activity::call_uninterruptible(Action::Signal(1)));
        let d = Dispatcher::default();

        let r = d.issue(&Order::at_cell(OrderKind::Move, tank, c(5, 5)), &mut w.ctx());
        assert_eq!(r, Ok(Dispatched::Refused));
        assert_eq!(w.names(tank), vec!["call", "move"]);

        assert_eq!(d.issue(&Order::stop(tank), &mut w.ctx()), Ok(Dispatched::Refused));
        assert_eq!(w.names(tank), vec!["call", "move"]);
    }

    #[test]
    fn stop_cancels_everything() {
        let (mut w, k) = world();
        let tank = w.spawn(k.tank, 1, c(0, 0));
        w.stacks[tank.index()].queue(Activity::wait(50));
        w.stacks[tank.index()].queue(Activity::move_to(c(3, 3)));
        let d = Dispatcher::default();

        // Queued stops are still immediate.
        assert_eq!(d.issue(&Order::stop(tank).queued(true), &mut w.ctx()), Ok(Dispatched::Stopped));
        assert_eq!(w.names(tank), vec!["wait"]);
        assert!(w.stacks[tank.index()].current().unwrap().is_canceled());
    }

    #[test]
    fn immediate_order_releases_claims() {
        let (mut w, k) = world();
        let truck = w.spawn(k.truck, 1, c(0, 0));
        let refinery = w.spawn(k.refinery, 1, c(0, 6));
        w.reservations.reserve(refinery, truck).unwrap();
        let d = Dispatcher::default();

        let queued = Order::at_cell(OrderKind::Move, truck, c(5, 5)).queued(true);
        d.issue(&queued, &mut w.ctx()).unwrap();
        assert_eq!(w.reservations.holder(refinery), Some(truck));

        d.issue(&Order::at_cell(OrderKind::Move, truck, c(5, 5)), &mut w.ctx()).unwrap();
        assert!(w.reservations.is_empty());
    }

    #[test]
    fn enter_reserves_and_releases_on_arrival() {
        let (mut w, k) = world();
        let tank = w.spawn(k.tank, 1, c(0, 0));
        let refinery = w.spawn(k.refinery, 1, c(0, 6));
        let d = Dispatcher::default();

        let order = Order::on_actor(OrderKind::Enter, tank, refinery);
        assert_eq!(d.issue(&order, &mut w.ctx()), Ok(Dispatched::Replaced));
        assert_eq!(w.reservations.holder(refinery), Some(tank));
        assert_eq!(w.names(tank), vec!["enter", "call"]);

        // Re-issuing releases the old claim first, then claims again.
        assert_eq!(d.issue(&order, &mut w.ctx()), Ok(Dispatched::Replaced));
        assert_eq!(w.reservations.len(), 1);
        assert_eq!(w.reservations.holder(refinery), Some(tank));
    }

    #[test]
    fn enter_on_reserved_dock_is_rejected() {
        let (mut w, k) = world();
        let tank = w.spawn(k.tank, 1, c(0, 0));
        let other = w.spawn(k.tank, 1, c(1, 0));
        let refinery = w.spawn(k.refinery, 1, c(0, 6));
        w.reservations.reserve(refinery, other).unwrap();
        w.stacks[tank.index()].queue(Activity::wait(5));
        let d = Dispatcher::default();

        let r = d.issue(&Order::on_actor(OrderKind::Enter, tank, refinery), &mut w.ctx());
        assert_eq!(r, Err(OrderError::Ineligible { kind: OrderKind::Enter, subject: tank }));
        assert_eq!(w.names(tank), vec!["wait"]);
        assert!(!w.stacks[tank.index()].current().unwrap().is_canceled());
    }

    #[test]
    fn dock_order_returns_home() {
        let (mut w, k) = world();
        let truck = w.spawn(k.truck, 1, c(3, 2));
        let refinery = w.spawn(k.refinery, 1, c(0, 6));
        let d = Dispatcher::default();

        d.issue(&Order::on_actor(OrderKind::Dock, truck, refinery), &mut w.ctx()).unwrap();
        let targets: Vec<Target> = w.stacks[truck.index()].targets().collect();
        assert_eq!(targets, vec![Target::Actor(refinery), Target::Cell(c(3, 2))]);
    }

    #[test]
    fn capture_order_enters_then_captures() {
        let (mut w, k) = world();
        let eng = w.spawn(k.engineer, 1, c(0, 0));
        let hq = w.spawn(k.hq, 2, c(4, 4));
        let d = Dispatcher::default();
        d.issue(&Order::on_actor(OrderKind::Capture, eng, hq), &mut w.ctx()).unwrap();
        assert_eq!(w.names(eng), vec!["enter", "capture"]);
    }

    #[test]
    fn rejections() {
        let (mut w, k) = world();
        let tank = w.spawn(k.tank, 1, c(0, 0));
        let gone = w.spawn(k.tank, 1, c(1, 0));
        let hq = w.spawn(k.hq, 1, c(4, 4));
        w.actors.remove(gone);
        let d = Dispatcher::default();

        let r = d.issue(&Order::at_cell(OrderKind::Move, gone, c(2, 2)), &mut w.ctx());
        assert_eq!(r, Err(OrderError::UnknownSubject(gone)));

        let r = d.issue(&Order::new(OrderKind::Move, tank), &mut w.ctx());
        assert_eq!(r, Err(OrderError::MissingTarget(OrderKind::Move)));

        let r = d.issue(&Order::at_cell(OrderKind::Move, hq, c(2, 2)), &mut w.ctx());
        assert_eq!(r, Err(OrderError::Ineligible { kind: OrderKind::Move, subject: hq }));

        let r = d.issue(&Order::on_actor(OrderKind::Attack, tank, hq), &mut w.ctx());
        assert_eq!(r, Err(OrderError::Ineligible { kind: OrderKind::Attack, subject: tank }));

        let r = Dispatcher::empty().issue(&Order::stop(tank), &mut w.ctx());
        assert_eq!(r, Err(OrderError::NoTargeter(OrderKind::Stop)));

        assert!(w.stacks.iter().all(|s| s.is_idle()));
    }

    #[test]
    fn sell_without_target() {
        let (mut w, k) = world();
        let refinery = w.spawn(k.refinery, 1, c(0, 6));
        let d = Dispatcher::default();
        assert_eq!(d.issue(&Order::new(OrderKind::Sell, refinery), &mut w.ctx()), Ok(Dispatched::Replaced));
        assert_eq!(w.names(refinery), vec!["sell"]);
    }
}
