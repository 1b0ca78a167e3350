//! Fluent builder for constructing a [`Sim`].

use log::info;

use tp_core::{SimConfig, SimRng};
use tp_entity::Registry;
use tp_topology::{Router, ShortestPathRouter, Topology};

use crate::{NoopObserver, Sim, SimObserver, SimResult};

/// Fluent builder for [`Sim<R, O>`].
///
/// # Required inputs
///
/// - [`Topology`]: the station/line graph, immutable for the whole run
/// - [`SimConfig`]: seed, default capacity, arrival policy, step budget
/// - `R: Router`: routing strategy and owner of the run's random source
///
/// # Optional inputs
///
/// | Method          | Default          |
/// |-----------------|------------------|
/// | `.observer(o)`  | [`NoopObserver`] |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::seeded(topology, config)
///     .observer(EventCollector::new())
///     .build()?;
/// ```
pub struct SimBuilder<R: Router, O: SimObserver> {
    topology: Topology,
    config:   SimConfig,
    router:   R,
    observer: O,
}

impl<R: Router> SimBuilder<R, NoopObserver> {
    pub fn new(topology: Topology, config: SimConfig, router: R) -> Self {
        Self {
            topology,
            config,
            router,
            observer: NoopObserver,
        }
    }
}

impl SimBuilder<ShortestPathRouter, NoopObserver> {
    /// Use the default [`ShortestPathRouter`], drawing from the router
    /// stream of `config.seed`.
    pub fn seeded(topology: Topology, config: SimConfig) -> Self {
        let mut root = SimRng::new(config.seed);
        let router = ShortestPathRouter::with_rng(root.child(SimRng::ROUTER_STREAM));
        Self::new(topology, config, router)
    }
}

impl<R: Router, O: SimObserver> SimBuilder<R, O> {
    /// Replace the observer.
    pub fn observer<O2: SimObserver>(self, observer: O2) -> SimBuilder<R, O2> {
        SimBuilder {
            topology: self.topology,
            config:   self.config,
            router:   self.router,
            observer,
        }
    }

    /// Validate the configuration and return an empty, ready-to-step [`Sim`].
    pub fn build(self) -> SimResult<Sim<R, O>> {
        self.config.validate()?;

        info!(
            "sim ready: {} stations, {} lines, seed {}, arrival policy {}",
            self.topology.station_count(),
            self.topology.line_count(),
            self.config.seed,
            self.config.arrival_policy,
        );

        Ok(Sim {
            clock:    self.config.make_clock(),
            config:   self.config,
            topology: self.topology,
            registry: Registry::new(),
            router:   self.router,
            observer: self.observer,
        })
    }
}
