//! The `Sim` struct and its tick loop.

use lift_core::{BuildingConfig, CarId, Direction, Floor, PassengerId, SimClock, Tick};
use lift_dispatch::{Dispatcher, Event, NextFloorPolicy};
use tracing::{debug, info, warn};

use crate::building::{Fleet, Landing, Motion, Passenger, Trip};
use crate::{Arrival, ArrivalQueue, SimError, SimObserver, SimResult, SimStats, TickSummary, TrafficGenerator};

/// The building simulator.
///
/// `Sim` plays the physical side of the building and feeds the dispatcher
/// one event at a time.  Each tick runs four phases:
///
/// 1. **Arrivals**: scheduled and generated passengers appear on their
///    landing and press the hall button for their direction.
/// 2. **Cars** (ascending `CarId`): a moving car reaching a floor either
///    stops (the floor is its head stop) or reports `PassingFloor` and may be
///    told to stop there; doors that have been open for `door_ticks` close and
///    the car departs, or reports `Idle` if it has nowhere to go.
/// 3. **Boarding**: every car with open doors takes waiting passengers whose
///    direction it shows, up to capacity.  Each new rider presses their
///    destination button.
/// 4. **Hall lamps**: waiting passengers whose lamp went out without them
///    boarding (the car was full) press it again.
///
/// Every dispatcher command is applied to the cars before the next event is
/// raised.  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Building layout, timing and dispatch settings.
    pub config: BuildingConfig,

    /// Simulation clock — tracks the current tick and maps to wall time.
    pub clock: SimClock,

    /// The scheduler under test.
    pub dispatcher: Dispatcher<Box<dyn NextFloorPolicy>>,

    /// Physical cars.  The dispatcher reads them through `CarSensors`.
    pub fleet: Fleet,

    /// One landing per floor, indexed by `Floor`.
    pub landings: Vec<Landing>,

    /// Every passenger ever spawned, indexed by `PassengerId`.
    pub passengers: Vec<Passenger>,

    /// Scheduled arrivals not yet spawned.
    pub arrivals: ArrivalQueue,

    /// Random traffic source, active until `config.end_tick()`.
    pub generator: Option<TrafficGenerator>,

    pub stats: SimStats,

    started:     bool,
    tick_events: usize,
}

impl Sim {
    pub(crate) fn new(
        config:     BuildingConfig,
        dispatcher: Dispatcher<Box<dyn NextFloorPolicy>>,
        arrivals:   ArrivalQueue,
        generator:  Option<TrafficGenerator>,
    ) -> Self {
        Self {
            clock:       SimClock::new(config.tick_duration_secs),
            fleet:       Fleet::new(config.car_count, config.car_capacity),
            landings:    vec![Landing::default(); config.floor_count as usize],
            passengers:  Vec::new(),
            stats:       SimStats::default(),
            started:     false,
            tick_events: 0,
            config,
            dispatcher,
            arrivals,
            generator,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            floors = self.config.floor_count,
            cars = self.config.car_count,
            until = %self.config.end_tick(),
            "simulation started",
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        self.finish(observer);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.  Random traffic still stops
    /// at `end_tick`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    /// Run past `end_tick` until every passenger has been delivered and no
    /// scheduled arrivals remain, for at most `max_ticks` more ticks.
    ///
    /// No random traffic is generated after `end_tick`.  Returns `true` if
    /// the building drained.
    pub fn run_until_drained<O: SimObserver>(
        &mut self,
        max_ticks: u64,
        observer:  &mut O,
    ) -> SimResult<bool> {
        let limit = self.clock.current_tick + max_ticks;
        while self.clock.current_tick < limit
            && (self.clock.current_tick < self.config.end_tick() || !self.is_drained())
        {
            self.step(observer);
        }

        let drained = self.is_drained();
        if !drained {
            warn!(
                tick = %self.clock.current_tick,
                waiting = self.stats.waiting,
                riding = self.stats.riding,
                "tick limit reached before the building drained",
            );
        }
        self.finish(observer);
        Ok(drained)
    }

    /// Queue an extra passenger arrival.
    pub fn schedule(&mut self, arrival: Arrival) -> SimResult<()> {
        arrival.validate(self.config.floor_count)?;
        if arrival.tick < self.clock.current_tick {
            return Err(SimError::Config(format!(
                "arrival at {} is in the past (now {})",
                arrival.tick, self.clock.current_tick
            )));
        }
        self.arrivals.push(arrival);
        Ok(())
    }

    /// `true` once nobody is waiting, riding, or still scheduled to appear.
    pub fn is_drained(&self) -> bool {
        self.stats.in_flight() == 0 && self.arrivals.is_empty()
    }

    pub fn summary(&self) -> TickSummary {
        TickSummary {
            tick:          self.clock.current_tick,
            waiting:       self.stats.waiting,
            riding:        self.stats.riding,
            delivered:     self.stats.delivered,
            pending_calls: self.dispatcher.registry().pending_len(),
        }
    }

    // ── Tick processing ───────────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.tick_events = 0;
        self.process_tick(now, observer);
        observer.on_tick_end(now, self.tick_events);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(&self.summary());
        }
        self.clock.advance();
    }

    fn finish<O: SimObserver>(&mut self, observer: &mut O) {
        info!(
            tick = %self.clock.current_tick,
            spawned = self.stats.spawned,
            delivered = self.stats.delivered,
            mean_wait = self.stats.mean_wait_ticks(),
            "simulation finished",
        );
        observer.on_sim_end(self.clock.current_tick, &self.stats);
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        // Every car announces itself once so the dispatcher can park it.
        if !self.started {
            self.started = true;
            for car in CarId::first(self.config.car_count) {
                self.dispatch(Event::Idle { car }, now, observer);
            }
        }

        // ── Phase 1: arrivals ─────────────────────────────────────────────
        let mut arrivals = self.arrivals.drain_tick(now).unwrap_or_default();
        if now < self.config.end_tick() {
            if let Some(generator) = &mut self.generator {
                arrivals.extend(generator.generate(now));
            }
        }
        for arrival in arrivals {
            self.spawn(arrival, now, observer);
        }

        // ── Phase 2: car movement and doors ───────────────────────────────
        for car in CarId::first(self.config.car_count) {
            self.advance_car(car, now, observer);
        }

        // ── Phase 3: boarding ─────────────────────────────────────────────
        for car in CarId::first(self.config.car_count) {
            self.board(car, now, observer);
        }

        // ── Phase 4: re-press lamps that went out ─────────────────────────
        let mut presses = Vec::new();
        for (f, landing) in self.landings.iter().enumerate() {
            for dir in Direction::ALL {
                let wants = landing
                    .waiting
                    .iter()
                    .any(|p| self.passengers[p.index()].direction == dir);
                if wants && !landing.lamps.shows(dir) {
                    presses.push((Floor(f as u32), dir));
                }
            }
        }
        for (floor, dir) in presses {
            self.press_hall(floor, dir, now, observer);
        }
    }

    /// Hand `event` to the dispatcher and apply the returned commands.
    fn dispatch<O: SimObserver>(&mut self, event: Event, now: Tick, observer: &mut O) {
        let commands = self.dispatcher.handle(event, &self.fleet);
        for command in &commands {
            self.fleet.car_mut(command.car()).apply(command);
        }
        self.tick_events += 1;
        observer.on_event(now, &event, &commands);
    }

    fn spawn<O: SimObserver>(&mut self, arrival: Arrival, now: Tick, observer: &mut O) {
        let Some(direction) = arrival.direction() else {
            warn!(floor = %arrival.origin, "dropping arrival with identical origin and destination");
            return;
        };

        let id = PassengerId(self.passengers.len() as u32);
        self.passengers.push(Passenger {
            id,
            origin:      arrival.origin,
            destination: arrival.destination,
            direction,
            spawn_tick:  now,
            board_tick:  None,
            car:         None,
        });
        self.stats.record_spawn();
        self.landings[arrival.origin.index()].waiting.push(id);
        debug!(passenger = %id, from = %arrival.origin, to = %arrival.destination, "passenger arrived");

        self.press_hall(arrival.origin, direction, now, observer);
    }

    fn press_hall<O: SimObserver>(&mut self, floor: Floor, dir: Direction, now: Tick, observer: &mut O) {
        self.landings[floor.index()].lamps.set(dir, true);
        self.dispatch(Event::HallCall { floor, direction: dir }, now, observer);
    }

    fn advance_car<O: SimObserver>(&mut self, id: CarId, now: Tick, observer: &mut O) {
        let car = self.fleet.car(id);
        let head = car.stops.first().copied();
        let (motion, current) = (car.motion, car.floor);

        match motion {
            Motion::Moving { direction, arrive } if now >= arrive => {
                let floor = current.step(direction);
                self.fleet.car_mut(id).floor = floor;
                if head != Some(floor) {
                    self.dispatch(Event::PassingFloor { car: id, floor, direction }, now, observer);
                }
                self.settle(id, now, observer);
            }
            Motion::DoorsOpen { close } if now >= close => self.settle(id, now, observer),
            Motion::Waiting if head.is_some() => self.settle(id, now, observer),
            _ => {}
        }
    }

    /// Decide what a car that is at a floor with doors closed does next.
    fn settle<O: SimObserver>(&mut self, id: CarId, now: Tick, observer: &mut O) {
        let car = self.fleet.car(id);
        let floor = car.floor;
        let was_waiting = car.motion == Motion::Waiting;

        match car.stops.first().copied() {
            Some(head) if head == floor => self.open_doors(id, now, observer),
            Some(head) => {
                if let Some(direction) = Direction::between(floor, head) {
                    let arrive = now + self.config.ticks_per_floor;
                    self.fleet.car_mut(id).motion = Motion::Moving { direction, arrive };
                }
            }
            None => {
                self.fleet.car_mut(id).motion = Motion::Waiting;
                if !was_waiting {
                    self.dispatch(Event::Idle { car: id }, now, observer);
                }
            }
        }
    }

    fn open_doors<O: SimObserver>(&mut self, id: CarId, now: Tick, observer: &mut O) {
        let floor = self.fleet.car(id).floor;
        self.dispatch(Event::StoppedAtFloor { car: id, floor }, now, observer);

        let passengers = &self.passengers;
        let car = &mut self.fleet.cars[id.index()];
        car.motion = Motion::DoorsOpen { close: now + self.config.door_ticks };
        car.pressed.retain(|&f| f != floor);
        let (leaving, staying): (Vec<PassengerId>, Vec<PassengerId>) = car
            .riders
            .iter()
            .partition(|p| passengers[p.index()].destination == floor);
        car.riders = staying;

        let lamps = &mut self.landings[floor.index()].lamps;
        for dir in Direction::ALL {
            if car.indicators.shows(dir) {
                lamps.set(dir, false);
            }
        }

        for pid in leaving {
            let p = &self.passengers[pid.index()];
            let trip = Trip {
                passenger:   pid,
                origin:      p.origin,
                destination: p.destination,
                car:         id,
                spawn_tick:  p.spawn_tick,
                board_tick:  p.board_tick.unwrap_or(p.spawn_tick),
                arrive_tick: now,
            };
            self.stats.record_trip(&trip);
            observer.on_trip_complete(&trip);
        }
    }

    /// Move waiting passengers into `id` while its doors are open.
    fn board<O: SimObserver>(&mut self, id: CarId, now: Tick, observer: &mut O) {
        loop {
            let car = self.fleet.car(id);
            if !car.doors_open() || !car.has_room() {
                return;
            }
            let shown = car.indicators;
            let landing = &mut self.landings[car.floor.index()];
            let next = landing
                .waiting
                .iter()
                .position(|p| shown.shows(self.passengers[p.index()].direction));
            let Some(pos) = next else {
                return;
            };
            let pid = landing.waiting.remove(pos);

            let p = &mut self.passengers[pid.index()];
            p.board_tick = Some(now);
            p.car = Some(id);
            self.stats.record_board(p.spawn_tick, now);
            let destination = p.destination;

            let car = self.fleet.car_mut(id);
            car.riders.push(pid);
            if car.press(destination) {
                self.dispatch(Event::FloorButtonPressed { car: id, floor: destination }, now, observer);
            }
        }
    }
}
