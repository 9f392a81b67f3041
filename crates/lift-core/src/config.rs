//! Building and dispatch configuration.
//!
//! Both structs have sensible `Default`s; applications typically override a
//! handful of fields or load the whole thing from JSON with the `serde`
//! feature enabled (missing fields fall back to the defaults).

use crate::{Floor, LiftError, LiftResult, Tick};

// ── Dispatch modes ────────────────────────────────────────────────────────────

/// How a new hall call is handed to the fleet.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AssignmentMode {
    /// Record the call and let the next idle car discover it.  A parked car
    /// is woken so that it runs its idle search.
    #[default]
    Deferred,
    /// As `Deferred`, but when no car is parked, immediately assign the call
    /// to a moving car already heading toward it.
    Eager,
}

/// How repeated presses of the same hall button are counted.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DemandMode {
    /// A (floor, direction) entry is either pending or not.
    #[default]
    Flag,
    /// Each press increments a waiting-group count; clearing resets to zero.
    Counted,
}

/// Which next-floor search an idle car runs.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PolicyKind {
    /// Same-direction demand ahead first, then the reversed fallback tiers.
    #[default]
    Tiered,
    /// Closest pending call regardless of its direction.
    Nearest,
}

// ── DispatchConfig ────────────────────────────────────────────────────────────

/// Tunables for the dispatcher.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchConfig {
    /// A car whose load factor is above this fraction never stops for an
    /// opportunistic pickup.  Lower values favour fast through-trips, higher
    /// values favour picking up more passengers on the way.  Default: 0.6.
    pub pickup_load_threshold: f32,
    pub assignment:            AssignmentMode,
    pub demand:                DemandMode,
    pub policy:                PolicyKind,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            pickup_load_threshold: 0.6,
            assignment:            AssignmentMode::default(),
            demand:                DemandMode::default(),
            policy:                PolicyKind::default(),
        }
    }
}

impl DispatchConfig {
    pub fn validate(&self) -> LiftResult<()> {
        if !(0.0..=1.0).contains(&self.pickup_load_threshold) {
            return Err(LiftError::Config(format!(
                "pickup_load_threshold must be within [0, 1], got {}",
                self.pickup_load_threshold
            )));
        }
        Ok(())
    }
}

// ── BuildingConfig ────────────────────────────────────────────────────────────

/// Top-level configuration for one building and its simulation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuildingConfig {
    /// Number of floors; floors are numbered `0..floor_count`.
    pub floor_count: u32,

    /// Number of cars in the fleet.
    pub car_count: u16,

    /// Passengers a car can carry at once.
    pub car_capacity: u32,

    /// Ticks a car needs to travel one floor.
    pub ticks_per_floor: u64,

    /// Ticks the doors stay open at every stop.
    pub door_ticks: u64,

    /// Simulated seconds per tick.
    pub tick_duration_secs: u32,

    /// Ticks of traffic to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical traffic.
    pub seed: u64,

    /// Write a tick summary every N ticks.
    pub output_interval_ticks: u64,

    pub dispatch: DispatchConfig,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            floor_count:           8,
            car_count:             2,
            car_capacity:          8,
            ticks_per_floor:       2,
            door_ticks:            3,
            tick_duration_secs:    1,
            total_ticks:           600,
            seed:                  42,
            output_interval_ticks: 10,
            dispatch:              DispatchConfig::default(),
        }
    }
}

impl BuildingConfig {
    /// The tick at which traffic generation stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// The highest floor index.
    #[inline]
    pub fn top_floor(&self) -> Floor {
        Floor::top(self.floor_count)
    }

    /// `Ok` if `floor` exists in this building.
    pub fn check_floor(&self, floor: Floor) -> LiftResult<()> {
        if floor.0 < self.floor_count {
            Ok(())
        } else {
            Err(LiftError::FloorOutOfRange { floor, floor_count: self.floor_count })
        }
    }

    /// Reject configurations the simulator and dispatcher cannot run.
    pub fn validate(&self) -> LiftResult<()> {
        if self.floor_count < 2 {
            return Err(LiftError::Config(format!(
                "a building needs at least 2 floors, got {}",
                self.floor_count
            )));
        }
        if self.car_count == 0 {
            return Err(LiftError::Config("a building needs at least one car".into()));
        }
        if self.car_capacity == 0 {
            return Err(LiftError::Config("car_capacity must be at least 1".into()));
        }
        if self.ticks_per_floor == 0 || self.door_ticks == 0 {
            return Err(LiftError::Config(
                "ticks_per_floor and door_ticks must be at least 1".into(),
            ));
        }
        if self.tick_duration_secs == 0 {
            return Err(LiftError::Config("tick_duration_secs must be at least 1".into()));
        }
        self.dispatch.validate()
    }
}
