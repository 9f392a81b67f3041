//! Fluent builder for constructing a [`Sim`].

use lift_core::BuildingConfig;
use lift_dispatch::{Dispatcher, NextFloorPolicy, policy_for};
use tracing::info;

use crate::{ArrivalQueue, Sim, SimError, SimResult, TrafficGenerator};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`BuildingConfig`] — floors, cars, timing, dispatch settings, …
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                     |
/// |-------------------|---------------------------------------------|
/// | `.arrivals(q)`    | No scheduled passengers                     |
/// | `.generator(g)`   | No random traffic                           |
/// | `.policy(p)`      | The policy named by `config.dispatch.policy`|
///
/// # Example
///
/// ```rust,ignore
/// let config = BuildingConfig::default();
/// let traffic = TrafficGenerator::new(config.floor_count, SimRng::new(config.seed));
/// let mut sim = SimBuilder::new(config)
///     .generator(traffic)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:    BuildingConfig,
    arrivals:  Option<ArrivalQueue>,
    generator: Option<TrafficGenerator>,
    policy:    Option<Box<dyn NextFloorPolicy>>,
}

impl SimBuilder {
    pub fn new(config: BuildingConfig) -> Self {
        Self {
            config,
            arrivals:  None,
            generator: None,
            policy:    None,
        }
    }

    /// Supply a schedule of passenger arrivals (e.g. from
    /// [`load_traffic_csv`][crate::load_traffic_csv]).
    pub fn arrivals(mut self, arrivals: ArrivalQueue) -> Self {
        self.arrivals = Some(arrivals);
        self
    }

    /// Supply a random traffic source.  It is polled once per tick until
    /// `config.end_tick()`.
    pub fn generator(mut self, generator: TrafficGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Replace the configured next-floor policy.
    pub fn policy(mut self, policy: Box<dyn NextFloorPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Validate inputs, build the dispatcher and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let arrivals = self.arrivals.unwrap_or_default();
        for arrival in arrivals.iter() {
            arrival.validate(self.config.floor_count)?;
        }

        if let Some(generator) = &self.generator {
            if generator.floor_count() != self.config.floor_count {
                return Err(SimError::Config(format!(
                    "traffic generator covers {} floors but the building has {}",
                    generator.floor_count(),
                    self.config.floor_count
                )));
            }
        }

        let policy = self.policy.unwrap_or_else(|| policy_for(self.config.dispatch.policy));
        let dispatcher = Dispatcher::for_building(&self.config, policy);

        info!(
            floors = self.config.floor_count,
            cars = self.config.car_count,
            scheduled = arrivals.len(),
            random_traffic = self.generator.is_some(),
            "building simulator ready",
        );

        Ok(Sim::new(self.config, dispatcher, arrivals, self.generator))
    }
}
