//! Integration tests for lift-sim.

use lift_core::{
    AssignmentMode, BuildingConfig, CarId, DemandMode, DispatchConfig, Floor, PolicyKind, SimRng,
    Tick,
};
use lift_dispatch::{Command, Event, Indicators};

use crate::{
    Arrival, ArrivalQueue, NoopObserver, Sim, SimBuilder, SimError, SimObserver, SimStats,
    TickSummary, TrafficError, TrafficGenerator, Trip, load_traffic_reader,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(floor_count: u32, car_count: u16, total_ticks: u64) -> BuildingConfig {
    BuildingConfig {
        floor_count,
        car_count,
        car_capacity:          4,
        ticks_per_floor:       1,
        door_ticks:            2,
        tick_duration_secs:    1,
        total_ticks,
        seed:                  7,
        output_interval_ticks: 10,
        dispatch:              DispatchConfig::default(),
    }
}

fn arrival(tick: u64, origin: u32, destination: u32) -> Arrival {
    Arrival { tick: Tick(tick), origin: Floor(origin), destination: Floor(destination) }
}

fn random_sim(config: BuildingConfig, spawn_probability: f64) -> Sim {
    let traffic = TrafficGenerator::new(config.floor_count, SimRng::new(config.seed))
        .spawn_probability(spawn_probability);
    SimBuilder::new(config).generator(traffic).build().unwrap()
}

/// Scheduler and building invariants that must hold between any two ticks.
fn check_invariants(sim: &Sim) {
    let d = &sim.dispatcher;
    for car in d.cars() {
        assert!(car.is_queue_ordered(), "{} queue out of order: {:?}", car.id, car.queue());
    }

    let claims: Vec<_> = d.claims().collect();
    for (i, (car, claim)) in claims.iter().enumerate() {
        assert!(
            !d.registry().is_pending(claim.floor, claim.direction),
            "{car} claim on {} {} is also pending",
            claim.floor,
            claim.direction,
        );
        assert!(
            claims[i + 1..]
                .iter()
                .all(|(_, c)| (c.floor, c.direction) != (claim.floor, claim.direction)),
            "{} {} claimed twice",
            claim.floor,
            claim.direction,
        );
    }

    for car in &sim.fleet.cars {
        assert!(car.riders.len() as u32 <= car.capacity, "{} over capacity", car.id);
    }
}

/// Records trips and checks the lamps shown on every stop at a boundary floor.
#[derive(Default)]
struct Recorder {
    top:        Floor,
    trips:      Vec<Trip>,
    events:     usize,
    ticks:      u64,
    snapshots:  Vec<TickSummary>,
    ended:      u32,
}

impl SimObserver for Recorder {
    fn on_event(&mut self, _tick: Tick, event: &Event, commands: &[Command]) {
        self.events += 1;
        if let Event::StoppedAtFloor { car, floor } = *event {
            let expected = if floor == Floor::GROUND {
                Some(Indicators { up: true, down: false })
            } else if floor == self.top {
                Some(Indicators { up: false, down: true })
            } else {
                None
            };
            if let Some(indicators) = expected {
                assert_eq!(commands[0], Command::SetIndicators { car, indicators });
            }
        }
    }

    fn on_trip_complete(&mut self, trip: &Trip) {
        self.trips.push(*trip);
    }

    fn on_tick_end(&mut self, _tick: Tick, _events: usize) {
        self.ticks += 1;
    }

    fn on_snapshot(&mut self, summary: &TickSummary) {
        self.snapshots.push(*summary);
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _stats: &SimStats) {
        self.ended += 1;
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = SimBuilder::new(BuildingConfig::default()).build().unwrap();
        assert_eq!(sim.fleet.cars.len(), 2);
        assert_eq!(sim.landings.len(), 8);
        assert_eq!(sim.dispatcher.cars().len(), 2);
        assert!(sim.is_drained());
    }

    #[test]
    fn invalid_config_errors() {
        let config = BuildingConfig { floor_count: 1, ..BuildingConfig::default() };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Core(_))));
    }

    #[test]
    fn arrival_outside_building_errors() {
        let queue = ArrivalQueue::from_arrivals([arrival(0, 0, 3), arrival(5, 9, 0)]);
        let result = SimBuilder::new(test_config(6, 1, 10)).arrivals(queue).build();
        assert!(matches!(
            result,
            Err(SimError::Traffic(TrafficError::FloorOutOfRange { floor: Floor(9), .. }))
        ));
    }

    #[test]
    fn same_floor_arrival_errors() {
        let queue = ArrivalQueue::from_arrivals([arrival(2, 3, 3)]);
        let result = SimBuilder::new(test_config(6, 1, 10)).arrivals(queue).build();
        assert!(matches!(result, Err(SimError::Traffic(TrafficError::SameFloor { .. }))));
    }

    #[test]
    fn generator_floor_mismatch_errors() {
        let traffic = TrafficGenerator::new(12, SimRng::new(1));
        let result = SimBuilder::new(test_config(6, 1, 10)).generator(traffic).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn policy_override() {
        let sim = SimBuilder::new(test_config(6, 1, 10))
            .policy(Box::new(lift_dispatch::NearestPolicy))
            .build();
        assert!(sim.is_ok());
    }
}

// ── Traffic ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod traffic_tests {
    use super::*;

    #[test]
    fn csv_loads_into_queue() {
        let data = "tick,origin,destination\n3,4,0\n0,0,5\n3,2,7\n";
        let mut queue = load_traffic_reader(data.as_bytes()).unwrap();
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.next_tick(), Some(Tick(0)));

        let at_three = queue.drain_tick(Tick(3)).unwrap();
        assert_eq!(at_three, vec![arrival(3, 4, 0), arrival(3, 2, 7)]);
        assert_eq!(queue.len(), 1);
        assert!(queue.drain_tick(Tick(1)).is_none());
    }

    #[test]
    fn malformed_csv_is_parse_error() {
        let data = "tick,origin,destination\n0,zero,5\n";
        assert!(matches!(load_traffic_reader(data.as_bytes()), Err(TrafficError::Parse(_))));
    }

    #[test]
    fn generator_is_deterministic() {
        let mut a = TrafficGenerator::new(10, SimRng::new(99)).spawn_probability(0.5);
        let mut b = TrafficGenerator::new(10, SimRng::new(99)).spawn_probability(0.5);
        for t in 0..300 {
            let (x, y) = (a.generate(Tick(t)), b.generate(Tick(t)));
            assert_eq!(x, y);
            if let Some(arr) = x {
                arr.validate(10).unwrap();
            }
        }
    }

    #[test]
    fn zero_probability_spawns_nothing() {
        let mut g = TrafficGenerator::new(10, SimRng::new(1)).spawn_probability(0.0);
        assert!((0..100).all(|t| g.generate(Tick(t)).is_none()));
    }

    #[test]
    fn full_lobby_share_always_touches_ground() {
        let mut g = TrafficGenerator::new(10, SimRng::new(3))
            .spawn_probability(1.0)
            .lobby_share(1.0);
        for t in 0..100 {
            let arr = g.generate(Tick(t)).unwrap();
            assert!(arr.origin == Floor::GROUND || arr.destination == Floor::GROUND);
        }
    }
}

// ── Runs ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn single_passenger_delivered() {
        let queue = ArrivalQueue::from_arrivals([arrival(0, 0, 4)]);
        let mut sim = SimBuilder::new(test_config(6, 1, 10)).arrivals(queue).build().unwrap();
        let mut rec = Recorder { top: Floor(5), ..Recorder::default() };

        assert!(sim.run_until_drained(200, &mut rec).unwrap());

        assert_eq!(rec.trips.len(), 1);
        let trip = rec.trips[0];
        assert_eq!(trip.car, CarId(0));
        assert_eq!(trip.board_tick, Tick(0));
        // Doors close at T2, then one floor per tick to floor 4.
        assert_eq!(trip.arrive_tick, Tick(6));
        assert_eq!(sim.stats.delivered, 1);
        assert_eq!(sim.stats.in_flight(), 0);
    }

    #[test]
    fn cars_park_at_start() {
        let mut sim = SimBuilder::new(test_config(6, 3, 10)).build().unwrap();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert!(sim.dispatcher.cars().iter().all(|c| c.is_parked()));
        assert!(sim.fleet.cars.iter().all(|c| c.indicators == Indicators::BOTH));
    }

    #[test]
    fn down_trip_from_top() {
        let queue = ArrivalQueue::from_arrivals([arrival(4, 5, 1), arrival(6, 3, 0)]);
        let mut sim = SimBuilder::new(test_config(6, 1, 10)).arrivals(queue).build().unwrap();
        let mut rec = Recorder { top: Floor(5), ..Recorder::default() };
        assert!(sim.run_until_drained(200, &mut rec).unwrap());
        assert_eq!(rec.trips.len(), 2);
        assert!(rec.trips.iter().all(|t| t.arrive_tick > t.board_tick));
    }

    #[test]
    fn random_traffic_drains_under_every_mode() {
        for policy in [PolicyKind::Tiered, PolicyKind::Nearest] {
            for assignment in [AssignmentMode::Deferred, AssignmentMode::Eager] {
                for demand in [DemandMode::Flag, DemandMode::Counted] {
                    let mut config = test_config(10, 3, 400);
                    config.dispatch = DispatchConfig { policy, assignment, demand, ..config.dispatch };
                    let mut sim = random_sim(config, 0.3);
                    let mut rec = Recorder { top: Floor(9), ..Recorder::default() };

                    while sim.clock.current_tick < sim.config.end_tick() {
                        sim.run_ticks(1, &mut rec).unwrap();
                        check_invariants(&sim);
                    }
                    let drained = sim.run_until_drained(5_000, &mut rec).unwrap();

                    assert!(drained, "{policy:?}/{assignment:?}/{demand:?} did not drain");
                    assert!(sim.stats.spawned > 50);
                    assert_eq!(sim.stats.delivered, sim.stats.spawned);
                    assert_eq!(rec.trips.len() as u64, sim.stats.spawned);
                    check_invariants(&sim);
                }
            }
        }
    }

    #[test]
    fn small_cars_respect_capacity() {
        let mut config = test_config(8, 2, 300);
        config.car_capacity = 1;
        let mut sim = random_sim(config, 0.5);
        for _ in 0..300 {
            sim.run_ticks(1, &mut NoopObserver).unwrap();
            check_invariants(&sim);
        }
        assert!(sim.run_until_drained(10_000, &mut NoopObserver).unwrap());
    }

    #[test]
    fn trips_visit_their_floors() {
        let mut sim = random_sim(test_config(8, 2, 200), 0.3);
        let mut rec = Recorder { top: Floor(7), ..Recorder::default() };
        sim.run_until_drained(5_000, &mut rec).unwrap();
        for trip in &rec.trips {
            assert_ne!(trip.origin, trip.destination);
            assert!(trip.board_tick >= trip.spawn_tick);
            assert!(trip.arrive_tick > trip.board_tick);
            assert_eq!(sim.passengers[trip.passenger.index()].destination, trip.destination);
        }
    }

    #[test]
    fn same_seed_same_outcome() {
        let run = || {
            let mut sim = random_sim(test_config(8, 2, 300), 0.2);
            sim.run_until_drained(5_000, &mut NoopObserver).unwrap();
            sim.stats
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn schedule_rejects_past_arrivals() {
        let mut sim = SimBuilder::new(test_config(6, 1, 10)).build().unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert!(matches!(sim.schedule(arrival(2, 0, 3)), Err(SimError::Config(_))));
        assert!(sim.schedule(arrival(7, 0, 3)).is_ok());
        assert!(!sim.is_drained());
    }
}

// ── Observer hooks ────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[test]
    fn hooks_fire_on_schedule() {
        let mut sim = SimBuilder::new(test_config(6, 2, 50)).build().unwrap();
        let mut rec = Recorder { top: Floor(5), ..Recorder::default() };
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.ticks, 50);
        assert_eq!(rec.ended, 1);
        // Ticks 0, 10, 20, 30, 40.
        assert_eq!(rec.snapshots.len(), 5);
        assert_eq!(rec.snapshots[1].tick, Tick(10));
        // One Idle per car at start.
        assert_eq!(rec.events, 2);
    }

    #[test]
    fn snapshot_counts_passengers() {
        let queue = ArrivalQueue::from_arrivals([arrival(0, 3, 0), arrival(0, 4, 1)]);
        let mut sim = SimBuilder::new(test_config(6, 1, 10)).arrivals(queue).build().unwrap();
        let mut rec = Recorder { top: Floor(5), ..Recorder::default() };
        sim.run_ticks(1, &mut rec).unwrap();

        let first = rec.snapshots[0];
        assert_eq!(first.waiting, 2);
        assert_eq!(first.riding, 0);
        assert_eq!(first.delivered, 0);
    }
}
