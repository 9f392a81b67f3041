//! `lift-dispatch` — the elevator dispatch scheduler.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`registry`]    | `FloorRegistry` — pending hall calls per floor and direction    |
//! | [`car`]         | `CarState`, `Claim` — per-car destination queue and heading     |
//! | [`indicator`]   | `Indicators`, boundary-floor override                           |
//! | [`policy`]      | `NextFloorPolicy` trait, `TieredPolicy`, `NearestPolicy`        |
//! | [`event`]       | `Event` (inbound), `CarSensors` (queried car properties)        |
//! | [`command`]     | `Command` (outbound instructions for the physical cars)         |
//! | [`dispatcher`]  | `Dispatcher` — routes events to the handlers                    |
//!
//! # Execution model
//!
//! ```text
//! physical layer ──Event──▶ Dispatcher::handle(&mut self, ..) ──Vec<Command>──▶ physical layer
//!                               │
//!                               ├─ FloorRegistry  (owned)
//!                               └─ Vec<CarState>  (owned)
//! ```
//!
//! Every handler takes `&mut self` and runs to completion, so one event's
//! registry and queue mutations are fully settled before the next event is
//! accepted.  Nothing in this crate blocks, spawns, or locks.
//!
//! # Failure model
//!
//! Out-of-range floors and unknown cars are caller bugs and panic.  A car that
//! is too full for a pickup, or a duplicate request, is not an error: the
//! request simply stays in (or is absorbed by) the registry.

pub mod car;
pub mod command;
pub mod dispatcher;
pub mod event;
pub mod indicator;
pub mod policy;
pub mod registry;


pub use car::{CarState, Claim};
pub use command::Command;
pub use dispatcher::Dispatcher;
pub use event::{CarReading, CarSensors, Event, SensorSnapshot};
pub use indicator::{Indicators, boundary_heading};
pub use policy::{NearestPolicy, NextFloorPolicy, Pick, TieredPolicy, policy_for};
pub use registry::FloorRegistry;
