//! The four phases of one step, run against private copies of the registry
//! and router.

use log::{trace, warn};

use tp_core::{CarArrivalPolicy, CarId, PassengerId, StationId, Step};
use tp_entity::{CarState, Passenger, Registry};
use tp_topology::{Router, Topology, TopologyError};

use crate::{SimError, SimEvent, SimResult, StepReport};

/// Working state of a step in progress.  Dropped on error, which is how a
/// failed step is rolled back.
pub(crate) struct StepRun<'a, R: Router> {
    topology: &'a Topology,
    policy:   CarArrivalPolicy,
    pub(crate) registry: Registry,
    pub(crate) router:   R,
    pub(crate) events:   Vec<SimEvent>,
    pub(crate) report:   StepReport,
}

impl<'a, R: Router> StepRun<'a, R> {
    pub(crate) fn new(
        topology: &'a Topology,
        policy:   CarArrivalPolicy,
        registry: Registry,
        router:   R,
        step:     Step,
    ) -> Self {
        Self {
            topology,
            policy,
            registry,
            router,
            events: Vec::new(),
            report: StepReport { step, ..StepReport::default() },
        }
    }

    /// Run all phases in order.
    pub(crate) fn execute(mut self) -> SimResult<Self> {
        self.alight()?;
        self.advance()?;
        self.board()?;
        self.complete()?;
        Ok(self)
    }

    // ── ① Alight ──────────────────────────────────────────────────────────

    /// Waiting passengers standing at their destination arrive.  Riders
    /// never reach this phase at their destination: ④ drops them off in the
    /// step their car brings them there.
    fn alight(&mut self) -> SimResult<()> {
        for pid in self.registry.waiting_at_destination() {
            let station = self.passenger(pid)?.station();
            self.registry.arrive_passenger(pid)?;
            self.report.passengers_arrived += 1;
            self.events.push(SimEvent::PassengerArrived { passenger: pid, station });
        }
        Ok(())
    }

    // ── ② Advance ─────────────────────────────────────────────────────────

    fn advance(&mut self) -> SimResult<()> {
        for cid in self.registry.car_ids() {
            // retired cars stay shared with the committed registry
            if !self.registry.car(cid).ok_or_else(|| missing_car(cid))?.state().is_active() {
                continue;
            }
            let car = self.registry.car_mut(cid).ok_or_else(|| missing_car(cid))?;
            match car.state() {
                CarState::Pending => {
                    car.depart()?;
                    trace!("{cid} departs from {}", car.station());
                    self.report.departed += 1;
                }
                CarState::Moving => {
                    let from = car.station();
                    let (to, line) = car.advance(self.topology)?;
                    let riders = car.riders().to_vec();
                    for pid in riders {
                        let carrier = self.passenger(pid)?.car();
                        if carrier != Some(cid) {
                            return Err(SimError::Consistency(format!(
                                "{pid} rides {cid} but refers to {carrier:?}"
                            )));
                        }
                        self.registry.ride_passenger(pid, to)?;
                    }
                    self.report.moved += 1;
                    self.events.push(SimEvent::CarMoved { car: cid, from, to, line });
                }
                CarState::Arrived => {}
            }
        }
        Ok(())
    }

    // ── ③ Board ───────────────────────────────────────────────────────────

    fn board(&mut self) -> SimResult<()> {
        for cid in self.registry.car_ids() {
            let car = self.registry.car(cid).ok_or_else(|| missing_car(cid))?;
            if car.state() != CarState::Moving {
                continue;
            }
            let station = car.station();
            let waiting: Vec<(PassengerId, StationId)> = self
                .registry
                .waiting_at(station)
                .map(|p| (p.id(), p.destination()))
                .collect();

            for (pid, destination) in waiting {
                let car = self.registry.car_mut(cid).ok_or_else(|| missing_car(cid))?;
                if !car.has_space() {
                    break;
                }
                if !car.covers(destination) {
                    continue;
                }
                car.board(pid)?;
                self.registry.board_passenger(pid, cid)?;
                self.report.boarded += 1;
                self.events.push(SimEvent::Boarded { passenger: pid, car: cid, station });
            }
        }
        Ok(())
    }

    // ── ④ Complete ────────────────────────────────────────────────────────

    fn complete(&mut self) -> SimResult<()> {
        for cid in self.registry.car_ids() {
            let car = self.registry.car(cid).ok_or_else(|| missing_car(cid))?;
            if car.state() != CarState::Moving {
                continue;
            }
            let station = car.station();
            let exhausted = car.is_route_exhausted();
            let mut leaving = Vec::new();
            for &pid in car.riders() {
                if self.passenger(pid)?.destination() == station {
                    leaving.push(pid);
                }
            }

            for pid in leaving {
                self.drop_off(pid, cid)?;
            }
            if exhausted {
                self.finish_route(cid, station)?;
            }
        }
        Ok(())
    }

    fn finish_route(&mut self, cid: CarId, station: StationId) -> SimResult<()> {
        self.report.cars_arrived += 1;
        self.events.push(SimEvent::CarArrived { car: cid, station });

        match self.policy {
            CarArrivalPolicy::Retire => self.retire(cid, station),
            CarArrivalPolicy::Regenerate => {
                match self.router.random_route_from(self.topology, station) {
                    Ok(route) => {
                        let destination = route.destination();
                        self.registry
                            .car_mut(cid)
                            .ok_or_else(|| missing_car(cid))?
                            .reroute(route)?;
                        self.report.regenerated += 1;
                        self.events.push(SimEvent::Regenerated { car: cid, station, destination });
                        Ok(())
                    }
                    Err(TopologyError::NoRoute(_)) => {
                        warn!("{cid} has nowhere to go from {station}, retiring it");
                        self.retire(cid, station)
                    }
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    fn retire(&mut self, cid: CarId, station: StationId) -> SimResult<()> {
        self.registry.car_mut(cid).ok_or_else(|| missing_car(cid))?.retire()?;
        self.report.retired += 1;
        self.events.push(SimEvent::Retired { car: cid, station });
        Ok(())
    }

    // ── Shared ────────────────────────────────────────────────────────────

    /// Take `pid` out of `cid` at the car's station and mark it arrived.
    fn drop_off(&mut self, pid: PassengerId, cid: CarId) -> SimResult<()> {
        let car = self.registry.car_mut(cid).ok_or_else(|| {
            SimError::Consistency(format!("{pid} is boarded on missing {cid}"))
        })?;
        let station = car.station();
        car.alight(pid)?;

        let at = self.passenger(pid)?.station();
        if at != station {
            return Err(SimError::Consistency(format!(
                "{pid} is at {at} but its car {cid} is at {station}"
            )));
        }
        self.registry.arrive_passenger(pid)?;

        self.report.alighted += 1;
        self.report.passengers_arrived += 1;
        self.events.push(SimEvent::Alighted { passenger: pid, car: cid, station });
        self.events.push(SimEvent::PassengerArrived { passenger: pid, station });
        Ok(())
    }

    fn passenger(&self, pid: PassengerId) -> SimResult<&Passenger> {
        self.registry.passenger(pid).ok_or_else(|| missing_passenger(pid))
    }
}

fn missing_car(cid: CarId) -> SimError {
    SimError::Consistency(format!("{cid} vanished from the registry"))
}

fn missing_passenger(pid: PassengerId) -> SimError {
    SimError::Consistency(format!("{pid} vanished from the registry"))
}
