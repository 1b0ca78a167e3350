//! The `Sim` struct: spawning, stepping, and queries.

use log::{debug, error, info, trace};

use tp_core::{CarId, PassengerId, SimClock, SimConfig, StationId, Step};
use tp_entity::{Car, Passenger, Registry};
use tp_topology::{Route, Router, StationRef, Topology};

use crate::phases::StepRun;
use crate::{SimError, SimEvent, SimObserver, SimResult, StatKind, StatTable, StepReport};

// ── SpawnTarget ───────────────────────────────────────────────────────────────

/// Where a newly spawned car or passenger is headed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpawnTarget {
    /// Follow exactly these stations.  The first must be the origin.
    Route(Vec<StationRef>),
    /// Shortest path to this station.
    Destination(StationRef),
    /// Shortest path to a random station reachable from the origin.
    Random,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation: topology, entities, router, and observer.
///
/// `spawn_*` and [`step`](Self::step) are the only mutators and take
/// `&mut self`; queries take `&self`, so a query can never observe a step
/// half-way through.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: Router, O: SimObserver> {
    /// Global configuration (seed, capacity, arrival policy, step budget).
    pub config: SimConfig,

    /// Tracks the current step.  Only non-idle steps advance it.
    pub clock: SimClock,

    pub(crate) topology: Topology,
    pub(crate) registry: Registry,
    pub(crate) router:   R,
    pub(crate) observer: O,
}

impl<R: Router, O: SimObserver> Sim<R, O> {
    // ── Spawning ──────────────────────────────────────────────────────────

    /// Spawn one car with the configured default capacity.
    pub fn spawn_car(&mut self, origin: impl Into<StationRef>, target: SpawnTarget) -> SimResult<CarId> {
        let capacity = self.config.default_car_capacity;
        self.spawn_car_with_capacity(origin, target, capacity)
    }

    pub fn spawn_car_with_capacity(
        &mut self,
        origin:   impl Into<StationRef>,
        target:   SpawnTarget,
        capacity: usize,
    ) -> SimResult<CarId> {
        check_capacity(capacity)?;
        let route = self.plan_route(&origin.into(), &target)?;
        Ok(self.insert_car(route, capacity))
    }

    /// Spawn `amount` cars at `origin`.  With [`SpawnTarget::Random`] every
    /// car draws its own destination.  Nothing is spawned if any route fails.
    pub fn spawn_cars(
        &mut self,
        origin: impl Into<StationRef>,
        target: SpawnTarget,
        amount: usize,
    ) -> SimResult<Vec<CarId>> {
        let capacity = self.config.default_car_capacity;
        let routes = self.plan_routes(&origin.into(), &target, amount)?;
        Ok(routes.into_iter().map(|r| self.insert_car(r, capacity)).collect())
    }

    pub fn spawn_passenger(&mut self, origin: impl Into<StationRef>, target: SpawnTarget) -> SimResult<PassengerId> {
        let route = self.plan_route(&origin.into(), &target)?;
        Ok(self.insert_passenger(route))
    }

    /// Spawn `amount` passengers at `origin`; all or nothing.
    pub fn spawn_passengers(
        &mut self,
        origin: impl Into<StationRef>,
        target: SpawnTarget,
        amount: usize,
    ) -> SimResult<Vec<PassengerId>> {
        let routes = self.plan_routes(&origin.into(), &target, amount)?;
        Ok(routes.into_iter().map(|r| self.insert_passenger(r)).collect())
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance the simulation by one step.
    ///
    /// On a quiescent simulation this changes nothing and returns an idle
    /// report.  On error the simulation is left exactly as it was before the
    /// call.
    pub fn step(&mut self) -> SimResult<StepReport> {
        let now = self.clock.current_step;
        if self.is_quiescent() {
            trace!("{now}: quiescent, nothing to do");
            return Ok(StepReport::idle(now));
        }

        let step = now + 1;
        let run = StepRun::new(
            &self.topology,
            self.config.arrival_policy,
            self.registry.clone(),
            self.router.clone(),
            step,
        );
        let done = match run.execute() {
            Ok(done) => done,
            Err(e) => {
                error!("{step} aborted and rolled back: {e}");
                return Err(e);
            }
        };

        // ── Commit ────────────────────────────────────────────────────────
        self.registry = done.registry;
        self.router = done.router;
        self.clock.advance();

        for event in &done.events {
            trace!("{step} {} {:?}: {event}", event.kind(), event.subject());
            self.observer.on_event(step, event);
        }
        self.observer.on_step_end(&done.report);
        debug!("{}", done.report);
        Ok(done.report)
    }

    /// Step until `config.total_steps` is reached or the simulation goes
    /// quiescent.  Returns the number of steps executed.
    pub fn run(&mut self) -> SimResult<u64> {
        let end = self.config.end_step();
        let mut executed = 0;
        while self.clock.current_step < end {
            if self.step()?.idle {
                break;
            }
            executed += 1;
        }
        info!("run finished at {} after {executed} steps", self.clock);
        self.observer.on_run_end(self.clock.current_step);
        Ok(executed)
    }

    /// Execute up to `n` steps, stopping early at quiescence.  Ignores
    /// `total_steps`.
    pub fn run_steps(&mut self, n: u64) -> SimResult<u64> {
        for executed in 0..n {
            if self.step()?.idle {
                return Ok(executed);
            }
        }
        Ok(n)
    }

    /// `true` when no car is pending or moving and no waiting passenger
    /// stands at its destination: a step could not change anything.
    pub fn is_quiescent(&self) -> bool {
        self.registry.active_car_count() == 0 && self.registry.waiting_at_destination().is_empty()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    #[inline]
    pub fn current_step(&self) -> Step {
        self.clock.current_step
    }

    pub fn car(&self, id: CarId) -> SimResult<&Car> {
        self.registry.car(id).ok_or_else(|| SimError::Lookup(format!("no car {id}")))
    }

    pub fn passenger(&self, id: PassengerId) -> SimResult<&Passenger> {
        self.registry
            .passenger(id)
            .ok_or_else(|| SimError::Lookup(format!("no passenger {id}")))
    }

    /// Summary table of the given kind, rows ordered by id.
    pub fn get_stat(&self, kind: StatKind) -> StatTable {
        StatTable::collect(kind, &self.topology, &self.registry)
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consume the simulation and hand back its observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn resolve(&self, station: &StationRef) -> SimResult<StationId> {
        self.topology
            .resolve(station)
            .map_err(|_| SimError::InvalidStation(station.to_string()))
    }

    fn plan_route(&mut self, origin: &StationRef, target: &SpawnTarget) -> SimResult<Route> {
        let from = self.resolve(origin)?;
        match target {
            SpawnTarget::Route(stations) => {
                let ids = stations
                    .iter()
                    .map(|s| self.resolve(s))
                    .collect::<SimResult<Vec<_>>>()?;
                match ids.first() {
                    None => return Err(SimError::InvalidRoute("route is empty".into())),
                    Some(&first) if first != from => {
                        return Err(SimError::InvalidRoute(format!(
                            "route starts at {first}, not at origin {from}"
                        )));
                    }
                    Some(_) => {}
                }
                Ok(self.topology.validate_route(&ids)?)
            }
            SpawnTarget::Destination(to) => {
                let to = self.resolve(to)?;
                Ok(self.router.route_between(&self.topology, from, to)?)
            }
            SpawnTarget::Random => Ok(self.router.random_route_from(&self.topology, from)?),
        }
    }

    /// Plan `amount` routes, restoring the router's random state if any fails.
    fn plan_routes(&mut self, origin: &StationRef, target: &SpawnTarget, amount: usize) -> SimResult<Vec<Route>> {
        let saved = self.router.clone();
        let mut routes = Vec::with_capacity(amount);
        for _ in 0..amount {
            match self.plan_route(origin, target) {
                Ok(route) => routes.push(route),
                Err(e) => {
                    self.router = saved;
                    return Err(e);
                }
            }
        }
        Ok(routes)
    }

    fn insert_car(&mut self, route: Route, capacity: usize) -> CarId {
        let origin = route.origin();
        let destination = route.destination();
        let car = self.registry.add_car(route, capacity);
        debug!("{car} spawned at {origin} bound for {destination}");
        self.observer.on_event(
            self.clock.current_step,
            &SimEvent::CarSpawned { car, origin, destination, capacity },
        );
        car
    }

    fn insert_passenger(&mut self, route: Route) -> PassengerId {
        let origin = route.origin();
        let destination = route.destination();
        let passenger = self.registry.add_passenger(route);
        debug!("{passenger} spawned at {origin} bound for {destination}");
        self.observer.on_event(
            self.clock.current_step,
            &SimEvent::PassengerSpawned { passenger, origin, destination },
        );
        passenger
    }
}

fn check_capacity(capacity: usize) -> SimResult<()> {
    if capacity == 0 {
        return Err(SimError::Config("car capacity must be at least 1".into()));
    }
    Ok(())
}
