//! Running totals over a simulation.

use lift_core::Tick;

use crate::Trip;

/// Aggregate passenger statistics, updated as the simulation runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimStats {
    pub spawned:          u64,
    pub delivered:        u64,
    /// Passengers currently on a landing.
    pub waiting:          u64,
    /// Passengers currently inside a car.
    pub riding:           u64,
    pub total_wait_ticks: u64,
    pub max_wait_ticks:   u64,
    pub total_trip_ticks: u64,
    pub max_trip_ticks:   u64,
}

impl SimStats {
    pub(crate) fn record_spawn(&mut self) {
        self.spawned += 1;
        self.waiting += 1;
    }

    pub(crate) fn record_board(&mut self, spawn: Tick, board: Tick) {
        let wait = board.since(spawn);
        self.waiting -= 1;
        self.riding += 1;
        self.total_wait_ticks += wait;
        self.max_wait_ticks = self.max_wait_ticks.max(wait);
    }

    pub(crate) fn record_trip(&mut self, trip: &Trip) {
        let total = trip.total_ticks();
        self.riding -= 1;
        self.delivered += 1;
        self.total_trip_ticks += total;
        self.max_trip_ticks = self.max_trip_ticks.max(total);
    }

    /// Passengers spawned but not yet delivered.
    #[inline]
    pub fn in_flight(&self) -> u64 {
        self.waiting + self.riding
    }

    /// Mean ticks from spawn to boarding over every boarded passenger.
    pub fn mean_wait_ticks(&self) -> f64 {
        let boarded = self.delivered + self.riding;
        if boarded == 0 {
            0.0
        } else {
            self.total_wait_ticks as f64 / boarded as f64
        }
    }

    /// Mean ticks from spawn to arrival over every delivered passenger.
    pub fn mean_trip_ticks(&self) -> f64 {
        if self.delivered == 0 {
            0.0
        } else {
            self.total_trip_ticks as f64 / self.delivered as f64
        }
    }
}
