//! Unit tests for ls-actor.

#[cfg(test)]
mod helpers {
    use ls_core::{ActorId, ActorTypeId, Cell, PlayerId};
    use ls_grid::MoverProfile;

    use crate::{ActorInfo, ActorRules, ActorStore};

    pub struct World {
        pub rules:    ActorRules,
        pub store:    ActorStore,
        pub tank:     ActorTypeId,
        pub refinery: ActorTypeId,
    }

    pub fn world() -> World {
        let mut rules = ActorRules::new();
        let tank = rules.add(ActorInfo::unit("tank", MoverProfile::wheeled()).with_attack_range(4));
        let refinery = rules.add(ActorInfo::building("refinery", 2, 2).with_dock(Cell::new(1, 2)));
        World { rules, store: ActorStore::new(), tank, refinery }
    }

    impl World {
        pub fn spawn(&mut self, kind: ActorTypeId, owner: u8, x: i32, y: i32) -> ActorId {
            let info = self.rules.get(kind).unwrap().clone();
            self.store.spawn(kind, &info, PlayerId(owner), Cell::new(x, y))
        }
    }
}

#[cfg(test)]
mod rules {
    use ls_core::Cell;

    use crate::{ActorInfo, ActorRules};

    #[test]
    fn building_footprint_is_row_major() {
        let info = ActorInfo::building("wall", 3, 2);
        assert_eq!(info.footprint.len(), 6);
        assert_eq!(info.footprint[0], Cell::new(0, 0));
        assert_eq!(info.footprint[3], Cell::new(0, 1));
        assert!(!info.is_mobile());
    }

    #[test]
    fn ids_follow_registration_order() {
        let mut rules = ActorRules::new();
        let a = rules.add(ActorInfo::building("a", 1, 1));
        let b = rules.add(ActorInfo::building("b", 1, 1).sellable());
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(rules.by_name("b"), Some(b));
        assert_eq!(rules.by_name("zzz"), None);
        assert!(rules.get(b).unwrap().sellable);
        assert_eq!(rules.iter().count(), 2);
    }

    #[test]
    fn default_unit_blocks_and_occupies_one_cell() {
        let info = ActorInfo::unit("rifle", ls_grid::MoverProfile::infantry());
        assert!(info.blocks);
        assert_eq!(info.footprint, vec![Cell::new(0, 0)]);
        assert!(!info.non_blocking().blocks);
    }
}

#[cfg(test)]
mod store {
    use ls_core::{ActorId, Cell, CoreError, PlayerId};
    use ls_grid::Occupancy;

    use super::helpers::world;

    #[test]
    fn spawn_assigns_dense_ids() {
        let mut w = world();
        let a = w.spawn(w.tank, 1, 0, 0);
        let b = w.spawn(w.tank, 2, 3, 3);
        assert_eq!((a, b), (ActorId(0), ActorId(1)));
        assert_eq!(w.store.len(), 2);
        assert_eq!(w.store.position(b), Some(Cell::new(3, 3)));
        assert_eq!(w.store.owner(a), Some(PlayerId(1)));
        assert_eq!(w.store.kind_of(b), Some(w.tank));
    }

    #[test]
    fn removal_keeps_the_slot() {
        let mut w = world();
        let a = w.spawn(w.tank, 1, 0, 0);
        let b = w.spawn(w.tank, 1, 1, 0);
        assert!(w.store.remove(a));
        assert!(!w.store.remove(a), "second removal is a no-op");
        assert!(!w.store.is_in_world(a));
        assert_eq!(w.store.position(a), None);
        assert_eq!(w.store.occupied_cells(a).count(), 0);
        assert_eq!(w.store.live_ids().collect::<Vec<_>>(), vec![b]);
        assert_eq!(w.store.actor_ids().count(), 2);
        assert!(w.store.occupants(Cell::new(0, 0)).is_empty());

        let c = w.spawn(w.tank, 1, 0, 0);
        assert_eq!(c, ActorId(2), "ids are never reused");
    }

    #[test]
    fn unknown_ids_are_not_in_world() {
        let w = world();
        assert!(!w.store.is_in_world(ActorId(7)));
        assert!(!w.store.is_in_world(ActorId::INVALID));
    }

    #[test]
    fn move_updates_occupancy() {
        let mut w = world();
        let a = w.spawn(w.tank, 1, 0, 0);
        w.store.move_to(a, Cell::new(1, 1)).unwrap();
        assert!(w.store.occupants(Cell::new(0, 0)).is_empty());
        assert_eq!(w.store.occupants(Cell::new(1, 1)), &[a]);

        w.store.remove(a);
        assert_eq!(w.store.move_to(a, Cell::new(2, 2)), Err(CoreError::ActorNotFound(a)));
    }

    #[test]
    fn footprint_cells_and_nearest() {
        let mut w = world();
        let r = w.spawn(w.refinery, 1, 4, 4);
        let cells: Vec<_> = w.store.occupied_cells(r).collect();
        assert_eq!(cells, vec![Cell::new(4, 4), Cell::new(5, 4), Cell::new(4, 5), Cell::new(5, 5)]);
        assert_eq!(w.store.nearest_occupied_cell(r, Cell::new(0, 0)), Some(Cell::new(4, 4)));
        assert_eq!(w.store.nearest_occupied_cell(r, Cell::new(9, 5)), Some(Cell::new(5, 5)));
        assert!(w.store.is_adjacent_to(r, Cell::new(6, 6)));
        assert!(!w.store.is_adjacent_to(r, Cell::new(7, 6)));
    }

    #[test]
    fn ring_around_a_building() {
        let mut w = world();
        let r = w.spawn(w.refinery, 1, 4, 4);
        let ring = w.store.cells_around(r);
        assert_eq!(ring.len(), 12);
        assert!(ring.windows(2).all(|p| p[0] < p[1]));
        assert!(!ring.contains(&Cell::new(4, 4)));
        assert!(ring.contains(&Cell::new(3, 3)));
        assert!(ring.contains(&Cell::new(6, 6)));
    }

    #[test]
    fn occupants_are_sorted() {
        let mut w = world();
        let a = w.spawn(w.tank, 1, 2, 2);
        let b = w.spawn(w.tank, 1, 0, 0);
        w.store.move_to(b, Cell::new(2, 2)).unwrap();
        w.store.move_to(a, Cell::new(1, 1)).unwrap();
        w.store.move_to(a, Cell::new(2, 2)).unwrap();
        assert_eq!(w.store.occupants(Cell::new(2, 2)), &[a, b]);
    }

    #[test]
    fn occupancy_view_ignores_the_mover() {
        let mut w = world();
        let a = w.spawn(w.tank, 1, 0, 0);
        let b = w.spawn(w.tank, 1, 1, 0);
        let view = w.store.occupancy_for(a);
        assert!(!view.is_blocked(Cell::new(0, 0)));
        assert!(view.is_blocked(Cell::new(1, 0)));
        assert!(!view.ignoring(b).is_blocked(Cell::new(1, 0)));
        assert!(w.store.blocks(Cell::new(1, 0), a));
        assert!(!w.store.blocks(Cell::new(1, 0), b));
    }

    #[test]
    fn ownership() {
        let mut w = world();
        let a = w.spawn(w.tank, 1, 0, 0);
        let b = w.spawn(w.tank, 2, 1, 0);
        assert!(!w.store.same_owner(a, b));
        w.store.set_owner(b, PlayerId(1)).unwrap();
        assert!(w.store.same_owner(a, b));
        w.store.remove(b);
        assert!(!w.store.same_owner(a, b));
    }
}

#[cfg(test)]
mod rngs {
    use ls_core::ActorId;

    use crate::ActorRngs;

    #[test]
    fn sync_seeds_missing_rngs_only() {
        let mut rngs = ActorRngs::new(42);
        rngs.sync(2);
        let first: u32 = rngs.get_mut(ActorId(1)).unwrap().gen_range(0..1_000_000);
        rngs.sync(5);
        assert_eq!(rngs.len(), 5);
        let mut fresh = ActorRngs::new(42);
        fresh.sync(2);
        let again: u32 = fresh.get_mut(ActorId(1)).unwrap().gen_range(0..1_000_000);
        assert_eq!(first, again);
        assert!(rngs.get_mut(ActorId(9)).is_none());
    }
}
