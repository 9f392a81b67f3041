//! Direction indicator lamps.
//!
//! A car's [`Heading`] is the only stored direction state.  The pair of
//! up/down lamp booleans is derived here, at the boundary to the physical
//! car, so the two lamps can never disagree with the heading.

use lift_core::{CarId, Direction, Floor, Heading};

use crate::Command;

/// The two directional lamps a car shows to waiting passengers.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Indicators {
    pub up:   bool,
    pub down: bool,
}

impl Indicators {
    pub const BOTH: Indicators = Indicators { up: true, down: true };

    /// Up → up only; Down → down only; Idle → both ("I will serve either
    /// direction").
    pub fn for_heading(heading: Heading) -> Self {
        match heading {
            Heading::Up   => Indicators { up: true, down: false },
            Heading::Down => Indicators { up: false, down: true },
            Heading::Idle => Self::BOTH,
        }
    }

    /// `true` if the lamp for `dir` is lit.
    #[inline]
    pub fn shows(self, dir: Direction) -> bool {
        match dir {
            Direction::Up   => self.up,
            Direction::Down => self.down,
        }
    }

    /// Switch the lamp for `dir` on or off.
    pub fn set(&mut self, dir: Direction, on: bool) {
        match dir {
            Direction::Up   => self.up = on,
            Direction::Down => self.down = on,
        }
    }
}

/// Boundary-floor override applied whenever a car newly stops: a car on the
/// bottom floor can only go up, a car on the top floor can only go down.
pub fn boundary_heading(floor: Floor, floor_count: u32, heading: Heading) -> Heading {
    if floor == Floor::GROUND {
        Heading::Up
    } else if floor == Floor::top(floor_count) {
        Heading::Down
    } else {
        heading
    }
}

/// Build the command that lights `car`'s lamps for `heading`.
pub fn set_indicators(car: CarId, heading: Heading) -> Command {
    Command::SetIndicators { car, indicators: Indicators::for_heading(heading) }
}
