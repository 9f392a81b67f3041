//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use lift_core::Tick;
use lift_sim::{SimObserver, SimStats, TickSummary, Trip};

use crate::row::{TickSummaryRow, TripRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes completed trips and periodic tick summaries
/// to any [`OutputWriter`] backend.
///
/// Trips are buffered and written in batches at every snapshot and at the
/// end of the run.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    trips:      Vec<TripRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            trips:      Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_trips(&mut self) {
        if self.trips.is_empty() {
            return;
        }
        let result = self.writer.write_trips(&self.trips);
        self.trips.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_trip_complete(&mut self, trip: &Trip) {
        self.trips.push(TripRow::from(trip));
    }

    fn on_snapshot(&mut self, summary: &TickSummary) {
        self.flush_trips();
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _stats: &SimStats) {
        self.flush_trips();
        let result = self.writer.finish();
        self.store_err(result);
    }
}
