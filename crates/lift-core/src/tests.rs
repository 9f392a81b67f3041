//! Unit tests for lift-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CarId, PassengerId};

    #[test]
    fn index_matches_inner() {
        assert_eq!(CarId(3).index(), 3);
        assert_eq!(PassengerId(70_000).index(), 70_000);
    }

    #[test]
    fn first_is_dense() {
        let ids: Vec<_> = CarId::first(3).collect();
        assert_eq!(ids, [CarId(0), CarId(1), CarId(2)]);
        assert_eq!(PassengerId::first(0).count(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(CarId(1).to_string(), "car 1");
        assert_eq!(PassengerId(12).to_string(), "passenger 12");
    }
}

#[cfg(test)]
mod floor {
    use crate::{Direction, Floor, Heading};

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(Floor(2).distance(Floor(7)), 5);
        assert_eq!(Floor(7).distance(Floor(2)), 5);
        assert_eq!(Floor(4).distance(Floor(4)), 0);
    }

    #[test]
    fn step_moves_one_floor() {
        assert_eq!(Floor(3).step(Direction::Up), Floor(4));
        assert_eq!(Floor(3).step(Direction::Down), Floor(2));
    }

    #[test]
    #[should_panic(expected = "ground floor")]
    fn step_below_ground_panics() {
        let _ = Floor::GROUND.step(Direction::Down);
    }

    #[test]
    fn ahead_is_strict() {
        assert!(Floor(3).is_ahead(Floor(4), Direction::Up));
        assert!(!Floor(3).is_ahead(Floor(3), Direction::Up));
        assert!(Floor(3).is_ahead(Floor(0), Direction::Down));
        assert!(!Floor(3).is_ahead(Floor(5), Direction::Down));
    }

    #[test]
    fn direction_between() {
        assert_eq!(Direction::between(Floor(1), Floor(4)), Some(Direction::Up));
        assert_eq!(Direction::between(Floor(4), Floor(1)), Some(Direction::Down));
        assert_eq!(Direction::between(Floor(4), Floor(4)), None);
    }

    #[test]
    fn idle_heading_serves_both() {
        assert!(Heading::Idle.serves(Direction::Up));
        assert!(Heading::Idle.serves(Direction::Down));
        assert!(Heading::Up.serves(Direction::Up));
        assert!(!Heading::Up.serves(Direction::Down));
        assert!(!Heading::Down.serves(Direction::Up));
    }

    #[test]
    fn heading_from_direction() {
        assert_eq!(Heading::from(Direction::Down), Heading::Down);
        assert_eq!(Heading::Up.direction(), Some(Direction::Up));
        assert_eq!(Heading::Idle.direction(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Floor(5).to_string(), "F5");
        assert_eq!(Direction::Up.to_string(), "up");
        assert_eq!(Heading::Idle.to_string(), "idle");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(Tick(15).since(Tick(10)), 5);
        assert_eq!(Tick(3).since(Tick(10)), 0);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(2);
        assert_eq!(clock.elapsed_secs(), 0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.elapsed_secs(), 4);
    }

    #[test]
    fn clock_hms() {
        let mut clock = SimClock::new(61);
        for _ in 0..60 {
            clock.advance();
        }
        // 60 * 61 s = 3660 s = 01:01:00
        assert_eq!(clock.elapsed_hms(), (1, 1, 0));
        assert_eq!(clock.to_string(), "T60 (01:01:00)");
    }
}

#[cfg(test)]
mod rng {
    use crate::{Floor, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.floor_from(0, 40), r2.floor_from(0, 40));
        }
    }

    #[test]
    fn children_diverge() {
        let mut root = SimRng::new(7);
        let mut a = root.child(0);
        let mut b = root.child(1);
        let xs: Vec<_> = (0..16).map(|_| a.floor_from(0, 1_000)).collect();
        let ys: Vec<_> = (0..16).map(|_| b.floor_from(0, 1_000)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn floor_from_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let f = rng.floor_from(1, 8);
            assert!((1..8).contains(&f.0));
        }
    }

    #[test]
    fn floor_other_than_never_repeats() {
        let mut rng = SimRng::new(3);
        for _ in 0..1000 {
            assert_ne!(rng.floor_other_than(Floor(2), 5), Floor(2));
            assert_eq!(rng.floor_other_than(Floor(0), 2), Floor(1));
        }
    }

    #[test]
    fn chance_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.chance(0.0));
        assert!(rng.chance(1.0));
        assert!(rng.chance(7.5)); // clamped
    }
}

#[cfg(test)]
mod config {
    use crate::{BuildingConfig, DispatchConfig, Floor, LiftError, Tick};

    #[test]
    fn defaults_are_valid() {
        let cfg = BuildingConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.dispatch.pickup_load_threshold, 0.6);
        assert_eq!(cfg.top_floor(), Floor(7));
        assert_eq!(cfg.end_tick(), Tick(600));
    }

    #[test]
    fn single_floor_rejected() {
        let cfg = BuildingConfig { floor_count: 1, ..BuildingConfig::default() };
        assert!(matches!(cfg.validate(), Err(LiftError::Config(_))));
    }

    #[test]
    fn empty_fleet_rejected() {
        let cfg = BuildingConfig { car_count: 0, ..BuildingConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_capacity_rejected() {
        let cfg = BuildingConfig { car_capacity: 0, ..BuildingConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn threshold_outside_unit_interval_rejected() {
        let dispatch = DispatchConfig { pickup_load_threshold: 1.5, ..DispatchConfig::default() };
        assert!(dispatch.validate().is_err());
        let cfg = BuildingConfig { dispatch, ..BuildingConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn check_floor_bounds() {
        let cfg = BuildingConfig { floor_count: 5, ..BuildingConfig::default() };
        assert!(cfg.check_floor(Floor(4)).is_ok());
        match cfg.check_floor(Floor(5)) {
            Err(LiftError::FloorOutOfRange { floor, floor_count }) => {
                assert_eq!(floor, Floor(5));
                assert_eq!(floor_count, 5);
            }
            other => panic!("expected FloorOutOfRange, got {other:?}"),
        }
    }
}
