//! Physical building state: cars, floors and passengers.

use lift_core::{CarId, Direction, Floor, PassengerId, Tick};
use lift_dispatch::{CarSensors, Command, Indicators};

// ── Passengers ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Passenger {
    pub id:          PassengerId,
    pub origin:      Floor,
    pub destination: Floor,
    pub direction:   Direction,
    pub spawn_tick:  Tick,
    /// Set when the passenger steps into a car.
    pub board_tick:  Option<Tick>,
    pub car:         Option<CarId>,
}

/// A completed journey, reported to observers when the passenger alights.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Trip {
    pub passenger:   PassengerId,
    pub origin:      Floor,
    pub destination: Floor,
    pub car:         CarId,
    pub spawn_tick:  Tick,
    pub board_tick:  Tick,
    pub arrive_tick: Tick,
}

impl Trip {
    /// Ticks spent waiting on the origin floor.
    pub fn wait_ticks(&self) -> u64 {
        self.board_tick.since(self.spawn_tick)
    }

    /// Ticks from appearing on the origin floor to stepping out.
    pub fn total_ticks(&self) -> u64 {
        self.arrive_tick.since(self.spawn_tick)
    }
}

// ── Cars ──────────────────────────────────────────────────────────────────────

/// What a car's machinery is doing this tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Motion {
    /// Stationary, doors closed.
    Waiting,
    /// Travelling; reaches the next floor in `direction` at `arrive`.
    Moving { direction: Direction, arrive: Tick },
    /// Stationary, doors open until `close`.
    DoorsOpen { close: Tick },
}

/// A physical car.
///
/// `stops` and `indicators` are whatever the dispatcher last commanded;
/// `pressed` is the set of lit in-car buttons.
#[derive(Clone, Debug)]
pub struct Car {
    pub id:         CarId,
    pub floor:      Floor,
    pub motion:     Motion,
    pub stops:      Vec<Floor>,
    pub indicators: Indicators,
    pub riders:     Vec<PassengerId>,
    pub pressed:    Vec<Floor>,
    pub capacity:   u32,
}

impl Car {
    pub fn new(id: CarId, floor: Floor, capacity: u32) -> Self {
        Self {
            id,
            floor,
            motion:     Motion::Waiting,
            stops:      Vec::new(),
            indicators: Indicators::BOTH,
            riders:     Vec::new(),
            pressed:    Vec::new(),
            capacity,
        }
    }

    pub fn load_factor(&self) -> f32 {
        (self.riders.len() as f32 / self.capacity as f32).min(1.0)
    }

    pub fn has_room(&self) -> bool {
        (self.riders.len() as u32) < self.capacity
    }

    pub fn doors_open(&self) -> bool {
        matches!(self.motion, Motion::DoorsOpen { .. })
    }

    /// Light the in-car button for `floor`.  Returns `false` if it was lit.
    pub fn press(&mut self, floor: Floor) -> bool {
        if self.pressed.contains(&floor) {
            return false;
        }
        self.pressed.push(floor);
        true
    }

    /// Apply one dispatcher command addressed to this car.
    pub fn apply(&mut self, command: &Command) {
        debug_assert_eq!(command.car(), self.id);
        match command {
            Command::SetDestinations { stops, .. } => self.stops.clone_from(stops),
            Command::SetIndicators { indicators, .. } => self.indicators = *indicators,
            Command::Stop { .. } => self.stops.clear(),
        }
    }
}

/// Every car in the building, indexed by `CarId`.
///
/// This is what the dispatcher reads through [`CarSensors`].
#[derive(Clone, Debug, Default)]
pub struct Fleet {
    pub cars: Vec<Car>,
}

impl Fleet {
    pub fn new(car_count: u16, capacity: u32) -> Self {
        Self {
            cars: CarId::first(car_count).map(|id| Car::new(id, Floor::GROUND, capacity)).collect(),
        }
    }

    #[inline]
    pub fn car(&self, car: CarId) -> &Car {
        &self.cars[car.index()]
    }

    #[inline]
    pub fn car_mut(&mut self, car: CarId) -> &mut Car {
        &mut self.cars[car.index()]
    }

    pub fn riding(&self) -> usize {
        self.cars.iter().map(|c| c.riders.len()).sum()
    }
}

impl CarSensors for Fleet {
    fn current_floor(&self, car: CarId) -> Floor {
        self.car(car).floor
    }

    fn load_factor(&self, car: CarId) -> f32 {
        self.car(car).load_factor()
    }

    fn pressed_floors(&self, car: CarId) -> &[Floor] {
        &self.car(car).pressed
    }
}

// ── Floors ────────────────────────────────────────────────────────────────────

/// One landing: its queue of waiting passengers and its two hall lamps.
#[derive(Clone, Debug, Default)]
pub struct Landing {
    pub waiting: Vec<PassengerId>,
    pub lamps:   Indicators,
}
