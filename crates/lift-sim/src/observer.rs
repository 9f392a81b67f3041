//! Simulation observer trait for progress reporting and data collection.

use lift_core::Tick;
use lift_dispatch::{Command, Event};

use crate::{SimStats, Trip};

/// Building-wide counters at one point in time.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TickSummary {
    pub tick:          Tick,
    pub waiting:       u64,
    pub riding:        u64,
    pub delivered:     u64,
    /// (floor, direction) entries pending in the dispatcher's registry.
    pub pending_calls: usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — trip counter
///
/// ```rust,ignore
/// struct TripCounter(u64);
///
/// impl SimObserver for TripCounter {
///     fn on_trip_complete(&mut self, _trip: &Trip) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the dispatcher has handled `event`, with the commands it
    /// returned (already applied to the cars).
    fn on_event(&mut self, _tick: Tick, _event: &Event, _commands: &[Command]) {}

    /// Called when a passenger steps out at their destination.
    fn on_trip_complete(&mut self, _trip: &Trip) {}

    /// Called at the end of each tick.
    ///
    /// `events` is the number of events the dispatcher handled this tick.
    fn on_tick_end(&mut self, _tick: Tick, _events: usize) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks).
    fn on_snapshot(&mut self, _summary: &TickSummary) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _stats: &SimStats) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
