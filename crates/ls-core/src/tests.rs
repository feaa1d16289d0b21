//! Unit tests for ls-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ActorId, ActorTypeId, PlayerId};

    #[test]
    fn index_roundtrip() {
        let id = ActorId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(ActorId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(ActorId::INVALID.0, u32::MAX);
        assert_eq!(ActorTypeId::INVALID.0, u16::MAX);
        assert!(!PlayerId::INVALID.is_valid());
        assert!(PlayerId::NEUTRAL.is_valid());
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(ActorId::default(), ActorId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(ActorId(7).to_string(), "ActorId(7)");
    }
}

#[cfg(test)]
mod cell {
    use crate::{CELL_SIZE, Cell, WorldPos};

    #[test]
    fn distances() {
        let a = Cell::new(0, 0);
        let b = Cell::new(4, 3);
        assert_eq!(a.chebyshev(b), 4);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(a.distance_sq(b), 25);
    }

    #[test]
    fn adjacency_includes_diagonals() {
        let c = Cell::new(5, 5);
        assert!(c.is_adjacent_or_same(c));
        assert!(c.is_adjacent_or_same(Cell::new(6, 6)));
        assert!(!c.is_adjacent_or_same(Cell::new(7, 5)));
    }

    #[test]
    fn world_pos_roundtrip_through_center() {
        let c = Cell::new(-3, 12);
        assert_eq!(c.center().to_cell(), c);
    }

    #[test]
    fn negative_positions_floor() {
        assert_eq!(WorldPos::new(-1, 0).to_cell(), Cell::new(-1, 0));
        assert_eq!(WorldPos::new(CELL_SIZE, CELL_SIZE - 1).to_cell(), Cell::new(1, 0));
    }

    #[test]
    fn ordering_is_row_major_by_x_then_y() {
        let mut cells = vec![Cell::new(1, 0), Cell::new(0, 1), Cell::new(0, 0)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0)]);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(3).since(Tick(10)), 0);
    }

    #[test]
    fn clock_advances() {
        let mut clock = SimClock::new();
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(clock.to_string(), "T2");
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_retry_rejected() {
        let config = SimConfig { path_retry_ticks: 0, ..SimConfig::default() };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("path_retry_ticks"));
    }
}

#[cfg(test)]
mod rng {
    use crate::{ActorId, ActorRng};

    #[test]
    fn same_seed_same_stream() {
        let mut a = ActorRng::new(99, ActorId(3));
        let mut b = ActorRng::new(99, ActorId(3));
        let xs: Vec<u32> = (0..8).map(|_| a.gen_range(0..1000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen_range(0..1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn different_actors_diverge() {
        let mut a = ActorRng::new(99, ActorId(3));
        let mut b = ActorRng::new(99, ActorId(4));
        let xs: Vec<u32> = (0..8).map(|_| a.gen_range(0..1_000_000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen_range(0..1_000_000)).collect();
        assert_ne!(xs, ys);
    }
}
