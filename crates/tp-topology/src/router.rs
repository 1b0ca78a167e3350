//! Routing trait and default shortest-path implementation.
//!
//! # Pluggability
//!
//! `tp-sim` calls routing via the [`Router`] trait, so applications can swap
//! in custom strategies without touching the engine.  The router owns the
//! simulation's random source: random routes are reproducible given the seed
//! the router was built with, and nothing else in the workspace draws random
//! numbers during a run.

use tp_core::{SimRng, StationId};

use crate::{Route, Topology, TopologyResult};

/// Pluggable routing engine.
///
/// `Clone` is required so the engine can snapshot the router's random state
/// at the start of a step and discard it if the step aborts.
pub trait Router: Clone {
    /// Route from `from` to `to`.
    ///
    /// Returns [`TopologyError::Unreachable`](crate::TopologyError::Unreachable) if no path exists.
    fn route_between(
        &self,
        topology: &Topology,
        from: StationId,
        to: StationId,
    ) -> TopologyResult<Route>;

    /// Route from `from` to a randomly chosen reachable destination.
    ///
    /// Returns [`TopologyError::NoRoute`](crate::TopologyError::NoRoute) if `from` has no reachable peers.
    fn random_route_from(
        &mut self,
        topology: &Topology,
        from: StationId,
    ) -> TopologyResult<Route>;
}

// ── ShortestPathRouter ────────────────────────────────────────────────────────

/// Routes along [`Topology::shortest_path`] and picks random destinations
/// with an injected [`SimRng`].
#[derive(Clone, Debug)]
pub struct ShortestPathRouter {
    rng: SimRng,
}

impl ShortestPathRouter {
    /// Router with a fresh RNG seeded from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { rng: SimRng::new(seed) }
    }

    /// Router drawing from an existing RNG (e.g. a child of the run's root).
    pub fn with_rng(rng: SimRng) -> Self {
        Self { rng }
    }
}

impl Router for ShortestPathRouter {
    fn route_between(
        &self,
        topology: &Topology,
        from: StationId,
        to: StationId,
    ) -> TopologyResult<Route> {
        topology.shortest_path(from, to)
    }

    fn random_route_from(
        &mut self,
        topology: &Topology,
        from: StationId,
    ) -> TopologyResult<Route> {
        let to = topology.random_destination(from, &mut self.rng)?;
        topology.shortest_path(from, to)
    }
}
