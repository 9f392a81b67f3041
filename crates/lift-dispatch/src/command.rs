//! Outbound commands — what the dispatcher asks the physical cars to do.

use lift_core::{CarId, Floor};

use crate::Indicators;

/// An instruction for one physical car.
///
/// Commands are produced by [`Dispatcher`][crate::Dispatcher] handlers and
/// applied, in order, by whatever drives the cars (the building simulator in
/// `lift-sim`, or real hardware glue).  All of them are fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the car's stop list.  The car heads for `stops[0]`; an empty
    /// list means the car has nowhere to go.  An immediate stop shows up as a
    /// new head.
    SetDestinations {
        car:   CarId,
        stops: Vec<Floor>,
    },

    /// Light the up/down lamps.
    SetIndicators {
        car:        CarId,
        indicators: Indicators,
    },

    /// Halt and wait.  Sent to a car that has no work anywhere.
    Stop {
        car: CarId,
    },
}

impl Command {
    /// The car this command is addressed to.
    pub fn car(&self) -> CarId {
        match self {
            Command::SetDestinations { car, .. }
            | Command::SetIndicators { car, .. }
            | Command::Stop { car } => *car,
        }
    }
}
