//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `trips.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, TripRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    trips:     Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trips = Writer::from_path(dir.join("trips.csv"))?;
        trips.write_record([
            "passenger_id",
            "origin",
            "destination",
            "car_id",
            "spawn_tick",
            "board_tick",
            "arrive_tick",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "waiting", "riding", "delivered", "pending_calls"])?;

        Ok(Self {
            trips,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_trips(&mut self, rows: &[TripRow]) -> OutputResult<()> {
        for row in rows {
            self.trips.write_record(&[
                row.passenger_id.to_string(),
                row.origin.to_string(),
                row.destination.to_string(),
                row.car_id.to_string(),
                row.spawn_tick.to_string(),
                row.board_tick.to_string(),
                row.arrive_tick.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.waiting.to_string(),
            row.riding.to_string(),
            row.delivered.to_string(),
            row.pending_calls.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trips.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
