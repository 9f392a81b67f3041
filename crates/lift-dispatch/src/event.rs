//! Inbound events and the read-only car sensor interface.

use lift_core::{CarId, Direction, Floor};

/// Something that happened in the building.
///
/// Car events carry the car they came from; hall calls come from a floor's
/// up/down buttons.  Events are handed to
/// [`Dispatcher::handle`][crate::Dispatcher::handle] one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The car has no stops left and its doors have closed.
    Idle { car: CarId },

    /// A rider inside `car` pressed the button for `floor`.
    FloorButtonPressed { car: CarId, floor: Floor },

    /// `car` is about to pass `floor` while travelling in `direction`.  The
    /// car can still stop there if told to now.
    PassingFloor { car: CarId, floor: Floor, direction: Direction },

    /// `car` has stopped at `floor` and is opening its doors.
    StoppedAtFloor { car: CarId, floor: Floor },

    /// The up or down button was pressed on `floor`.
    HallCall { floor: Floor, direction: Direction },
}

impl Event {
    /// The car that raised this event, or `None` for hall calls.
    pub fn car(&self) -> Option<CarId> {
        match *self {
            Event::Idle { car }
            | Event::FloorButtonPressed { car, .. }
            | Event::PassingFloor { car, .. }
            | Event::StoppedAtFloor { car, .. } => Some(car),
            Event::HallCall { .. } => None,
        }
    }

    /// Short label, useful for log fields and CSV columns.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Idle { .. }               => "idle",
            Event::FloorButtonPressed { .. } => "floor_button_pressed",
            Event::PassingFloor { .. }       => "passing_floor",
            Event::StoppedAtFloor { .. }     => "stopped_at_floor",
            Event::HallCall { direction: Direction::Up, .. }   => "up_button_pressed",
            Event::HallCall { direction: Direction::Down, .. } => "down_button_pressed",
        }
    }
}

/// Read-only car properties the dispatcher queries while handling an event.
///
/// Implemented by whatever owns the physical cars.  The dispatcher never
/// writes through this interface; it changes cars only by returning
/// [`Command`][crate::Command]s.
pub trait CarSensors {
    fn current_floor(&self, car: CarId) -> Floor;

    /// Occupied fraction of the car's capacity, in `[0, 1]`.
    fn load_factor(&self, car: CarId) -> f32;

    /// Floors whose in-car buttons are currently lit.
    fn pressed_floors(&self, car: CarId) -> &[Floor];
}

// ── SensorSnapshot ────────────────────────────────────────────────────────────

/// One car's sensor values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarReading {
    pub floor:       Floor,
    pub load_factor: f32,
    pub pressed:     Vec<Floor>,
}

/// A plain table of sensor values indexed by `CarId`.
///
/// Handy for driving the dispatcher from recorded data or from tests without
/// a simulator.
#[derive(Debug, Clone, Default)]
pub struct SensorSnapshot {
    pub cars: Vec<CarReading>,
}

impl SensorSnapshot {
    /// `car_count` empty cars resting on the ground floor.
    pub fn new(car_count: usize) -> Self {
        Self { cars: vec![CarReading::default(); car_count] }
    }

    pub fn reading_mut(&mut self, car: CarId) -> &mut CarReading {
        &mut self.cars[car.index()]
    }
}

impl CarSensors for SensorSnapshot {
    fn current_floor(&self, car: CarId) -> Floor {
        self.cars[car.index()].floor
    }

    fn load_factor(&self, car: CarId) -> f32 {
        self.cars[car.index()].load_factor
    }

    fn pressed_floors(&self, car: CarId) -> &[Floor] {
        &self.cars[car.index()].pressed
    }
}
