//! `lift-core` — foundational types for the `rust_lift` dispatch framework.
//!
//! This crate is a dependency of every other `lift-*` crate.  It has no
//! `lift-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CarId`, `PassengerId`                                |
//! | [`floor`]       | `Floor`, `Direction` (hall calls), `Heading` (cars)   |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `SimRng`                                              |
//! | [`config`]      | `BuildingConfig`, `DispatchConfig` and its modes      |
//! | [`error`]       | `LiftError`, `LiftResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod floor;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AssignmentMode, BuildingConfig, DemandMode, DispatchConfig, PolicyKind};
pub use error::{LiftError, LiftResult};
pub use floor::{Direction, Floor, Heading};
pub use ids::{CarId, PassengerId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
