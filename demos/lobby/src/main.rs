//! lobby — morning traffic through a mid-rise office building.
//!
//! Runs random lobby-biased traffic through the dispatcher, drains the
//! building, and writes `trips.csv` and `tick_summaries.csv` to
//! `output/lobby/`.
//!
//! Usage: `lobby [config.json]`.  Fields missing from the JSON file fall back
//! to the built-in defaults below.  Set `RUST_LOG=lift_dispatch=debug` to see
//! every dispatch decision.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use lift_core::{BuildingConfig, SimRng, Tick};
use lift_dispatch::{Command, Event};
use lift_output::{CsvWriter, OutputWriter, SimOutputObserver};
use lift_sim::{SimBuilder, SimObserver, SimStats, TickSummary, TrafficGenerator, Trip};

// ── Constants ─────────────────────────────────────────────────────────────────

const FLOOR_COUNT:       u32 = 12;
const CAR_COUNT:         u16 = 3;
const TOTAL_TICKS:       u64 = 1_800; // 30 minutes at 1 s per tick
const SPAWN_PROBABILITY: f64 = 0.15;
const LOBBY_SHARE:       f64 = 0.7;
const DRAIN_LIMIT_TICKS: u64 = 20_000;
const OUTPUT_DIR:        &str = "output/lobby";

// ── Observer wrapper to count rows and events ─────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:        SimOutputObserver<W>,
    trip_rows:    usize,
    summary_rows: usize,
    events:       BTreeMap<&'static str, usize>,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, trip_rows: 0, summary_rows: 0, events: BTreeMap::new() }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_event(&mut self, _tick: Tick, event: &Event, _commands: &[Command]) {
        *self.events.entry(event.kind()).or_default() += 1;
    }

    fn on_trip_complete(&mut self, trip: &Trip) {
        self.trip_rows += 1;
        self.inner.on_trip_complete(trip);
    }

    fn on_snapshot(&mut self, summary: &TickSummary) {
        self.summary_rows += 1;
        self.inner.on_snapshot(summary);
    }

    fn on_sim_end(&mut self, final_tick: Tick, stats: &SimStats) {
        self.inner.on_sim_end(final_tick, stats);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

fn load_config() -> Result<BuildingConfig> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {path}"))?
        }
        None => BuildingConfig {
            floor_count: FLOOR_COUNT,
            car_count:   CAR_COUNT,
            total_ticks: TOTAL_TICKS,
            ..BuildingConfig::default()
        },
    };
    config.validate()?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();
    let config = load_config()?;

    println!("=== lobby — rust_lift dispatch ===");
    println!(
        "Floors: {}  |  Cars: {} × {} riders  |  Ticks: {}  |  Seed: {}",
        config.floor_count, config.car_count, config.car_capacity, config.total_ticks, config.seed
    );
    println!(
        "Dispatch: {:?} policy, {:?} assignment, {:?} demand, pickup threshold {:.2}",
        config.dispatch.policy,
        config.dispatch.assignment,
        config.dispatch.demand,
        config.dispatch.pickup_load_threshold
    );
    println!();

    // 1. Traffic and simulator.
    let traffic = TrafficGenerator::new(config.floor_count, SimRng::new(config.seed))
        .spawn_probability(SPAWN_PROBABILITY)
        .lobby_share(LOBBY_SHARE);
    let mut sim = SimBuilder::new(config).generator(traffic).build()?;

    // 2. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    // 3. Run until every passenger is home.
    let t0 = Instant::now();
    let drained = sim.run_until_drained(DRAIN_LIMIT_TICKS, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }
    if !drained {
        eprintln!("warning: building did not drain within {DRAIN_LIMIT_TICKS} extra ticks");
    }

    // 4. Summary.
    let stats = &sim.stats;
    println!("Simulation complete in {:.3} s at {}", elapsed.as_secs_f64(), sim.clock);
    println!("  trips.csv          : {} rows", obs.trip_rows);
    println!("  tick_summaries.csv : {} rows", obs.summary_rows);
    println!();
    println!("Passengers: {} spawned, {} delivered", stats.spawned, stats.delivered);
    println!(
        "Wait  (ticks): mean {:>6.1}  max {:>5}",
        stats.mean_wait_ticks(),
        stats.max_wait_ticks
    );
    println!(
        "Trip  (ticks): mean {:>6.1}  max {:>5}",
        stats.mean_trip_ticks(),
        stats.max_trip_ticks
    );
    println!();

    println!("{:<22} {:>8}", "Event", "Count");
    println!("{}", "-".repeat(31));
    for (kind, count) in &obs.events {
        println!("{kind:<22} {count:>8}");
    }
    println!();

    // 5. Final car table.
    println!("{:<8} {:<7} {:<8} {:<7}", "Car", "Floor", "Heading", "Parked");
    println!("{}", "-".repeat(32));
    for car in sim.dispatcher.cars() {
        println!(
            "{:<8} {:<7} {:<8} {:<7}",
            car.id.0,
            car.current_floor().to_string(),
            car.heading().to_string(),
            if car.is_parked() { "yes" } else { "no" },
        );
    }

    Ok(())
}
