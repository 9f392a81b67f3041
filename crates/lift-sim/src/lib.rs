//! `lift-sim` — building simulator for the rust_lift framework.
//!
//! Plays the physical side of a building (car motion, doors, passengers, hall
//! and car buttons) and drives a [`lift_dispatch::Dispatcher`] with the
//! events a real controller would see.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Arrivals  — scheduled/generated passengers appear and press hall buttons
//!   ② Cars      — movement, PassingFloor / StoppedAtFloor, door closing, Idle
//!   ③ Boarding  — waiting passengers enter cars showing their direction
//!   ④ Lamps     — passengers left behind re-press unlit hall buttons
//! ```
//!
//! Every event is handled to completion and its commands applied before the
//! next event is raised.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::{BuildingConfig, SimRng};
//! use lift_sim::{NoopObserver, SimBuilder, TrafficGenerator};
//!
//! let config = BuildingConfig::default();
//! let traffic = TrafficGenerator::new(config.floor_count, SimRng::new(config.seed));
//! let mut sim = SimBuilder::new(config).generator(traffic).build()?;
//! sim.run_until_drained(10_000, &mut NoopObserver)?;
//! println!("{:?}", sim.stats);
//! ```

pub mod builder;
pub mod building;
pub mod error;
pub mod observer;
pub mod sim;
pub mod stats;
pub mod traffic;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use building::{Car, Fleet, Landing, Motion, Passenger, Trip};
pub use error::{SimError, SimResult, TrafficError};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use sim::Sim;
pub use stats::SimStats;
pub use traffic::{Arrival, ArrivalQueue, TrafficGenerator, load_traffic_csv, load_traffic_reader};
