//! The `Dispatcher` — owns the registry and car states and reacts to events.

use lift_core::{AssignmentMode, BuildingConfig, CarId, DemandMode, Direction, DispatchConfig, Floor};
use tracing::{debug, warn};

use crate::indicator::set_indicators;
use crate::{
    CarSensors, CarState, Claim, Command, Event, FloorRegistry, Indicators, NextFloorPolicy,
    Pick, TieredPolicy, boundary_heading, policy_for,
};

/// Event-driven dispatch scheduler for one building.
///
/// `Dispatcher<P>` holds the shared [`FloorRegistry`] and every car's
/// [`CarState`].  Each inbound [`Event`] is handled by exactly one method
/// which mutates that state and returns the [`Command`]s the physical cars
/// must execute.
///
/// # Per-car state machine
///
/// ```text
///   Idle ──(stop committed)──▶ Moving ──(queue empty after arrival)──▶ Idle
/// ```
///
/// An idle car that finds no pending demand is *parked*: both lamps lit, told
/// to stop, and woken again by the next hall call.
///
/// # Claims
///
/// Whenever a hall call is handed to a car the registry entry is cleared and
/// a [`Claim`] recorded on that car, so a (floor, direction) call is never
/// pending and claimed at the same time, and never claimed by two cars.
pub struct Dispatcher<P: NextFloorPolicy = TieredPolicy> {
    config:   DispatchConfig,
    registry: FloorRegistry,
    cars:     Vec<CarState>,
    policy:   P,
}

impl Dispatcher<Box<dyn NextFloorPolicy>> {
    /// Like [`for_building`](Self::for_building), with the policy named by
    /// `config.dispatch.policy`.
    pub fn from_config(config: &BuildingConfig) -> Self {
        Self::for_building(config, policy_for(config.dispatch.policy))
    }
}

impl<P: NextFloorPolicy> Dispatcher<P> {
    /// Assemble a dispatcher from its parts.
    ///
    /// # Panics
    /// If `cars[i].id != CarId(i)` for some `i`.
    pub fn new(
        registry: FloorRegistry,
        cars:     Vec<CarState>,
        policy:   P,
        config:   DispatchConfig,
    ) -> Self {
        for (i, car) in cars.iter().enumerate() {
            assert_eq!(car.id.index(), i, "car states must be indexed by CarId");
        }
        Self { config, registry, cars, policy }
    }

    /// A dispatcher for `config`'s building with every car idle on the ground
    /// floor.
    pub fn for_building(config: &BuildingConfig, policy: P) -> Self {
        let registry = FloorRegistry::new(config.floor_count, config.dispatch.demand);
        let top = config.top_floor();
        let cars = CarId::first(config.car_count)
            .map(|id| CarState::new(id, Floor::GROUND, top))
            .collect();
        Self::new(registry, cars, policy, config.dispatch.clone())
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn registry(&self) -> &FloorRegistry {
        &self.registry
    }

    pub fn cars(&self) -> &[CarState] {
        &self.cars
    }

    pub fn car(&self, car: CarId) -> &CarState {
        self.cars
            .get(car.index())
            .unwrap_or_else(|| panic!("{car} is not part of this fleet"))
    }

    /// Every outstanding claim, paired with the car holding it.
    pub fn claims(&self) -> impl Iterator<Item = (CarId, Claim)> + '_ {
        self.cars
            .iter()
            .flat_map(|c| c.claims().iter().map(move |claim| (c.id, *claim)))
    }

    /// Run the idle search for `car` without committing anything.
    pub fn choose_next_floor(&self, car: CarId) -> Option<Pick> {
        self.policy.choose(self.car(car).current_floor(), &self.registry)
    }

    // ── Event routing ─────────────────────────────────────────────────────

    /// Process one event to completion and return the resulting commands.
    pub fn handle<S: CarSensors + ?Sized>(&mut self, event: Event, sensors: &S) -> Vec<Command> {
        match event {
            Event::Idle { car } => self.on_idle(car, sensors),
            Event::FloorButtonPressed { car, floor } => self.on_floor_button(car, floor, sensors),
            Event::PassingFloor { car, floor, direction } => {
                self.on_passing_floor(car, floor, direction, sensors)
            }
            Event::StoppedAtFloor { car, floor } => self.on_stopped_at_floor(car, floor, sensors),
            Event::HallCall { floor, direction } => self.on_hall_call(floor, direction, sensors),
        }
    }

    // ── Handlers ──────────────────────────────────────────────────────────

    /// `car` has run out of stops: pick its next floor or park it.
    pub fn on_idle<S: CarSensors + ?Sized>(&mut self, car: CarId, sensors: &S) -> Vec<Command> {
        self.sync(car, sensors);

        if !self.car(car).queue().is_empty() {
            debug!(%car, "idle with stops still queued; re-sending destinations");
            return vec![self.destinations(car)];
        }

        match self.choose_next_floor(car) {
            Some(pick) => self.commit_pick(car, pick),
            None => {
                let state = self.car_mut(car);
                state.park();
                debug!(%car, floor = %state.current_floor(), "no pending demand; parking");
                vec![
                    Command::SetIndicators { car, indicators: Indicators::BOTH },
                    Command::Stop { car },
                ]
            }
        }
    }

    /// A hall button was pressed.
    pub fn on_hall_call<S: CarSensors + ?Sized>(
        &mut self,
        floor:   Floor,
        dir:     Direction,
        sensors: &S,
    ) -> Vec<Command> {
        self.check_floor(floor);

        // A car is already on its way for this call: absorb the press.
        let counted = self.registry.mode() == DemandMode::Counted;
        for state in &mut self.cars {
            let id = state.id;
            if let Some(claim) = state.claim_mut(floor, dir) {
                if counted {
                    claim.groups += 1;
                }
                debug!(car = %id, %floor, direction = %dir, "hall call already claimed");
                return Vec::new();
            }
        }

        self.registry.add(floor, dir);

        if let Some(car) = self.nearest_parked(floor) {
            debug!(%car, %floor, direction = %dir, "waking parked car");
            return self.on_idle(car, sensors);
        }

        if self.config.assignment == AssignmentMode::Eager {
            if let Some(car) = self.best_moving_car(floor, dir, sensors) {
                self.claim(car, floor, dir);
                self.car_mut(car).request_stop(floor, false);
                debug!(%car, %floor, direction = %dir, "hall call assigned to moving car");
                return vec![self.destinations(car)];
            }
        }

        Vec::new()
    }

    /// A rider in `car` asked for `floor`.
    pub fn on_floor_button<S: CarSensors + ?Sized>(
        &mut self,
        car:     CarId,
        floor:   Floor,
        sensors: &S,
    ) -> Vec<Command> {
        self.sync(car, sensors);
        self.check_floor(floor);

        let before = self.car(car).heading();
        let changed = self.car_mut(car).request_stop(floor, false);

        let state = self.car(car);
        let heading = state.heading();
        let takes_waiting = state.current_floor() != floor
            && state.load_factor() <= self.config.pickup_load_threshold;
        if let Some(dir) = heading.direction() {
            // The car stops there anyway; let it take the waiting passengers.
            if takes_waiting && self.registry.is_pending(floor, dir) {
                self.claim(car, floor, dir);
            }
        }

        let mut commands = Vec::new();
        if heading != before {
            commands.push(set_indicators(car, heading));
        }
        if changed {
            commands.push(self.destinations(car));
        }
        commands
    }

    /// `car` is about to pass `floor`: stop there if someone waits in the
    /// car's direction and the car has room, or if a rider wants off.
    pub fn on_passing_floor<S: CarSensors + ?Sized>(
        &mut self,
        car:     CarId,
        floor:   Floor,
        dir:     Direction,
        sensors: &S,
    ) -> Vec<Command> {
        self.sync(car, sensors);
        self.check_floor(floor);
        self.car_mut(car).set_position(floor);

        let state = self.car(car);
        let pickup = state.heading().serves(dir)
            && state.load_factor() <= self.config.pickup_load_threshold
            && self.registry.is_pending(floor, dir);
        let rider_stop = sensors.pressed_floors(car).contains(&floor);
        if !pickup && !rider_stop {
            return Vec::new();
        }

        let changed = self.car_mut(car).request_stop(floor, true);
        if pickup {
            self.claim(car, floor, dir);
            debug!(%car, %floor, direction = %dir, "opportunistic pickup");
        }

        if changed {
            vec![self.destinations(car)]
        } else {
            Vec::new()
        }
    }

    /// `car` has stopped at `floor`.
    ///
    /// Pops the stop, re-derives the heading from the remaining queue,
    /// lights the lamps (with the boundary-floor override), and clears the
    /// registry for every direction those lamps serve.
    pub fn on_stopped_at_floor<S: CarSensors + ?Sized>(
        &mut self,
        car:     CarId,
        floor:   Floor,
        sensors: &S,
    ) -> Vec<Command> {
        self.sync(car, sensors);
        self.check_floor(floor);

        let floor_count = self.registry.floor_count();
        let state = self.car_mut(car);
        state.advance_after_arrival(floor);
        let shown = Indicators::for_heading(boundary_heading(floor, floor_count, state.heading()));
        let unserved: Vec<Claim> = state
            .take_claims_at(floor)
            .into_iter()
            .filter(|c| !shown.shows(c.direction))
            .collect();

        for dir in Direction::ALL.into_iter().filter(|&d| shown.shows(d)) {
            self.registry.clear(floor, dir);
            for other in &mut self.cars {
                other.release_claim(floor, dir);
            }
        }

        for claim in unserved {
            warn!(
                %car,
                floor = %claim.floor,
                direction = %claim.direction,
                "stopped without serving claimed call; returning it to the registry",
            );
            self.registry.restore(claim.floor, claim.direction, claim.groups);
        }

        vec![
            Command::SetIndicators { car, indicators: shown },
            self.destinations(car),
        ]
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn car_mut(&mut self, car: CarId) -> &mut CarState {
        self.cars
            .get_mut(car.index())
            .unwrap_or_else(|| panic!("{car} is not part of this fleet"))
    }

    fn check_floor(&self, floor: Floor) {
        assert!(
            floor.0 < self.registry.floor_count(),
            "{floor} is outside a {}-floor building",
            self.registry.floor_count(),
        );
    }

    /// Refresh the queried car properties from the sensors.
    fn sync<S: CarSensors + ?Sized>(&mut self, car: CarId, sensors: &S) {
        let floor = sensors.current_floor(car);
        let load = sensors.load_factor(car);
        let state = self.car_mut(car);
        state.set_position(floor);
        state.set_load_factor(load);
    }

    fn destinations(&self, car: CarId) -> Command {
        Command::SetDestinations { car, stops: self.car(car).queue().to_vec() }
    }

    /// Clear the registry entry for (`floor`, `dir`) and record it on `car`.
    fn claim(&mut self, car: CarId, floor: Floor, dir: Direction) {
        let groups = self.registry.clear(floor, dir);
        if groups == 0 {
            return;
        }
        debug!(%car, %floor, direction = %dir, groups, "claimed hall call");
        self.car_mut(car).add_claim(Claim { floor, direction: dir, groups });
    }

    fn commit_pick(&mut self, car: CarId, pick: Pick) -> Vec<Command> {
        self.claim(car, pick.floor, pick.demand);
        let state = self.car_mut(car);
        state.set_heading(pick.heading);
        state.request_stop(pick.floor, false);
        debug!(
            %car,
            from = %state.current_floor(),
            to = %pick.floor,
            heading = %pick.heading,
            "dispatching idle car",
        );
        vec![set_indicators(car, pick.heading), self.destinations(car)]
    }

    fn nearest_parked(&self, floor: Floor) -> Option<CarId> {
        self.cars
            .iter()
            .filter(|c| c.is_parked())
            .min_by_key(|c| (c.current_floor().distance(floor), c.id))
            .map(|c| c.id)
    }

    /// A moving car already heading toward `floor` in `dir` with room to
    /// spare: shortest queue first, then nearest.
    fn best_moving_car<S: CarSensors + ?Sized>(
        &self,
        floor:   Floor,
        dir:     Direction,
        sensors: &S,
    ) -> Option<CarId> {
        let threshold = self.config.pickup_load_threshold;
        self.cars
            .iter()
            .filter(|c| !c.is_parked() && c.heading().direction() == Some(dir))
            .filter(|c| c.current_floor().is_ahead(floor, dir))
            .filter(|c| sensors.load_factor(c.id) <= threshold)
            .min_by_key(|c| (c.queue().len(), c.current_floor().distance(floor), c.id))
            .map(|c| c.id)
    }
}
