//! Integration tests for lift-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{TickSummaryRow, TripRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn trip_row(passenger_id: u32) -> TripRow {
        TripRow {
            passenger_id,
            origin:      0,
            destination: 4,
            car_id:      1,
            spawn_tick:  10,
            board_tick:  13,
            arrive_tick: 21,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("trips.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("trips.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["passenger_id", "origin", "destination", "car_id", "spawn_tick", "board_tick", "arrive_tick"],
        );

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["tick", "waiting", "riding", "delivered", "pending_calls"]);
    }

    #[test]
    fn csv_trip_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_trips(&[trip_row(0), trip_row(1)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("trips.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "1");  // passenger_id
        assert_eq!(&rows[1][3], "1");  // car_id
        assert_eq!(&rows[1][6], "21"); // arrive_tick
    }

    #[test]
    fn csv_tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = TickSummaryRow { tick: 30, waiting: 4, riding: 2, delivered: 9, pending_calls: 3 };
        w.write_tick_summary(&row).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["30", "4", "2", "9", "3"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_is_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("does/not/exist")).is_err());
    }
}

#[cfg(test)]
mod observer_tests {
    use lift_core::{BuildingConfig, Floor, Tick};
    use lift_sim::{Arrival, ArrivalQueue, SimBuilder};

    use crate::{CsvWriter, SimOutputObserver};

    #[test]
    fn integration_csv() {
        let config = BuildingConfig {
            floor_count:           6,
            car_count:             1,
            total_ticks:           20,
            output_interval_ticks: 5,
            ..BuildingConfig::default()
        };
        let queue = ArrivalQueue::from_arrivals([
            Arrival { tick: Tick(0), origin: Floor(0), destination: Floor(3) },
            Arrival { tick: Tick(2), origin: Floor(5), destination: Floor(1) },
        ]);
        let mut sim = SimBuilder::new(config).arrivals(queue).build().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        assert!(sim.run_until_drained(500, &mut obs).unwrap());
        assert!(obs.take_error().is_none(), "no write errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("trips.csv")).unwrap();
        let trips: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(trips.len(), 2);
        let mut ids: Vec<_> = trips.iter().map(|r| r[0].to_owned()).collect();
        ids.sort();
        assert_eq!(ids, ["0", "1"]);

        // Snapshots at ticks 0, 5, 10, … up to wherever the run drained.
        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert!(summaries.len() >= 4);
        assert_eq!(&summaries[0][0], "0");
        assert_eq!(&summaries[1][0], "5");
    }
}
