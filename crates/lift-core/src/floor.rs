//! Floors and the two direction enums shared by every crate.
//!
//! Two separate enums are used on purpose: a hall call always wants to go
//! somewhere ([`Direction`]), while a car may have no assigned work at all
//! ([`Heading::Idle`]).  The car's heading is the single source of truth for
//! its indicator lamps; the lamp booleans are derived from it at the point
//! where they are pushed to the physical car.

use std::fmt;

// ── Floor ─────────────────────────────────────────────────────────────────────

/// A floor index in `0..floor_count`.  Floor 0 is the bottom (lobby).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Floor(pub u32);

impl Floor {
    pub const GROUND: Floor = Floor(0);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Number of floors between `self` and `other`.
    #[inline]
    pub fn distance(self, other: Floor) -> u32 {
        self.0.abs_diff(other.0)
    }

    /// The adjacent floor one step in `dir`.
    ///
    /// # Panics
    /// Panics when stepping down from floor 0.
    #[inline]
    pub fn step(self, dir: Direction) -> Floor {
        match dir {
            Direction::Up   => Floor(self.0 + 1),
            Direction::Down => {
                assert!(self.0 > 0, "cannot step below the ground floor");
                Floor(self.0 - 1)
            }
        }
    }

    /// `true` if `other` lies strictly beyond `self` when travelling in `dir`.
    #[inline]
    pub fn is_ahead(self, other: Floor, dir: Direction) -> bool {
        match dir {
            Direction::Up   => other > self,
            Direction::Down => other < self,
        }
    }

    /// The highest floor of a building with `floor_count` floors.
    #[inline]
    pub fn top(floor_count: u32) -> Floor {
        Floor(floor_count.saturating_sub(1))
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// Direction of a hall call or of physical travel.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Up, Direction::Down];

    /// Direction of travel from `from` to `to`, or `None` when they are equal.
    #[inline]
    pub fn between(from: Floor, to: Floor) -> Option<Direction> {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Some(Direction::Up),
            std::cmp::Ordering::Less    => Some(Direction::Down),
            std::cmp::Ordering::Equal   => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up   => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Heading ───────────────────────────────────────────────────────────────────

/// A car's committed direction of service.
///
/// `Idle` means the car has no queued work and will serve either direction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    Up,
    Down,
    #[default]
    Idle,
}

impl Heading {
    /// The travel direction, or `None` for `Idle`.
    #[inline]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Heading::Up   => Some(Direction::Up),
            Heading::Down => Some(Direction::Down),
            Heading::Idle => None,
        }
    }

    /// `true` if a car with this heading is willing to take passengers
    /// travelling in `dir`.  An idle car serves both directions.
    #[inline]
    pub fn serves(self, dir: Direction) -> bool {
        match self {
            Heading::Idle => true,
            _             => self.direction() == Some(dir),
        }
    }

    #[inline]
    pub fn is_idle(self) -> bool {
        matches!(self, Heading::Idle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Heading::Up   => "up",
            Heading::Down => "down",
            Heading::Idle => "idle",
        }
    }
}

impl From<Direction> for Heading {
    #[inline]
    fn from(dir: Direction) -> Heading {
        match dir {
            Direction::Up   => Heading::Up,
            Direction::Down => Heading::Down,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
