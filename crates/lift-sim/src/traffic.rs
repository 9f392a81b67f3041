//! Passenger traffic: scheduled arrivals, CSV loading and random generation.
//!
//! # CSV format
//!
//! One row per passenger.  Rows need not be sorted.
//!
//! ```csv
//! tick,origin,destination
//! 0,0,5
//! 3,4,0
//! 3,2,7
//! ```
//!
//! Floors are validated against the building when the simulator is built,
//! not while parsing.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use lift_core::{Direction, Floor, SimRng, Tick};
use serde::Deserialize;

use crate::TrafficError;

// ── Arrival ───────────────────────────────────────────────────────────────────

/// One passenger appearing at `origin` at `tick`, wanting to go to
/// `destination`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Arrival {
    pub tick:        Tick,
    pub origin:      Floor,
    pub destination: Floor,
}

impl Arrival {
    /// Hall-call direction this passenger presses, or `None` if the trip
    /// starts and ends on the same floor.
    pub fn direction(&self) -> Option<Direction> {
        Direction::between(self.origin, self.destination)
    }

    /// `Ok` if both floors exist in a `floor_count`-floor building and differ.
    pub fn validate(&self, floor_count: u32) -> Result<(), TrafficError> {
        for floor in [self.origin, self.destination] {
            if floor.0 >= floor_count {
                return Err(TrafficError::FloorOutOfRange { tick: self.tick, floor, floor_count });
            }
        }
        if self.origin == self.destination {
            return Err(TrafficError::SameFloor { tick: self.tick, floor: self.origin });
        }
        Ok(())
    }
}

// ── ArrivalQueue ──────────────────────────────────────────────────────────────

/// Future arrivals keyed by tick.
///
/// Draining a tick with no arrivals costs a single map lookup, so the
/// simulator can ask every tick.
#[derive(Default, Debug)]
pub struct ArrivalQueue {
    inner: BTreeMap<Tick, Vec<Arrival>>,
    total: usize,
}

impl ArrivalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_arrivals(arrivals: impl IntoIterator<Item = Arrival>) -> Self {
        let mut queue = Self::new();
        for a in arrivals {
            queue.push(a);
        }
        queue
    }

    pub fn push(&mut self, arrival: Arrival) {
        self.inner.entry(arrival.tick).or_default().push(arrival);
        self.total += 1;
    }

    /// Remove and return every arrival scheduled for exactly `tick`, in
    /// insertion order.
    pub fn drain_tick(&mut self, tick: Tick) -> Option<Vec<Arrival>> {
        let arrivals = self.inner.remove(&tick)?;
        self.total -= arrivals.len();
        Some(arrivals)
    }

    /// The earliest tick with a queued arrival.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arrival> + '_ {
        self.inner.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

// ── CSV loading ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TrafficRecord {
    tick:        u64,
    origin:      u32,
    destination: u32,
}

/// Load an arrival schedule from a CSV file.
pub fn load_traffic_csv(path: &Path) -> Result<ArrivalQueue, TrafficError> {
    let file = std::fs::File::open(path).map_err(TrafficError::Io)?;
    load_traffic_reader(file)
}

/// Like [`load_traffic_csv`] but accepts any `Read` source.
pub fn load_traffic_reader<R: Read>(reader: R) -> Result<ArrivalQueue, TrafficError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut queue = ArrivalQueue::new();

    for result in csv_reader.deserialize::<TrafficRecord>() {
        let row = result.map_err(|e| TrafficError::Parse(e.to_string()))?;
        queue.push(Arrival {
            tick:        Tick(row.tick),
            origin:      Floor(row.origin),
            destination: Floor(row.destination),
        });
    }

    Ok(queue)
}

// ── TrafficGenerator ──────────────────────────────────────────────────────────

/// Seeded random traffic.
///
/// Every tick at most one passenger appears, with probability
/// `spawn_probability`.  A `lobby_share` fraction of trips start or end on the
/// ground floor (split evenly between the two); the rest pick two distinct
/// floors uniformly.
pub struct TrafficGenerator {
    floor_count:       u32,
    spawn_probability: f64,
    lobby_share:       f64,
    rng:               SimRng,
}

impl TrafficGenerator {
    pub fn new(floor_count: u32, rng: SimRng) -> Self {
        Self {
            floor_count,
            spawn_probability: 0.1,
            lobby_share:       0.5,
            rng,
        }
    }

    pub fn spawn_probability(mut self, p: f64) -> Self {
        self.spawn_probability = p;
        self
    }

    pub fn lobby_share(mut self, share: f64) -> Self {
        self.lobby_share = share;
        self
    }

    pub fn floor_count(&self) -> u32 {
        self.floor_count
    }

    /// Roll for a new passenger at `tick`.
    pub fn generate(&mut self, tick: Tick) -> Option<Arrival> {
        if self.floor_count < 2 || !self.rng.chance(self.spawn_probability) {
            return None;
        }

        let (origin, destination) = if self.rng.chance(self.lobby_share) {
            let upper = self.rng.floor_from(1, self.floor_count);
            if self.rng.chance(0.5) {
                (Floor::GROUND, upper)
            } else {
                (upper, Floor::GROUND)
            }
        } else {
            let origin = self.rng.floor_from(0, self.floor_count);
            (origin, self.rng.floor_other_than(origin, self.floor_count))
        };

        Some(Arrival { tick, origin, destination })
    }
}
