//! Cars: a route, a cursor into it, and the passengers aboard.

use tp_core::{CarId, LineId, PassengerId, StationId};
use tp_topology::{Route, Topology};

use crate::{CarState, EntityError, EntityResult};

/// A vehicle travelling along a fixed route, one station per step.
///
/// The car's station is always `route[cursor]`.  Riders are held as ids in
/// boarding order; the car never owns the passengers themselves.
#[derive(Clone, Debug)]
pub struct Car {
    id:       CarId,
    route:    Route,
    cursor:   usize,
    capacity: usize,
    riders:   Vec<PassengerId>,
    state:    CarState,
}

impl Car {
    /// A `Pending` car standing at the origin of `route`.
    pub fn new(id: CarId, route: Route, capacity: usize) -> Self {
        Self {
            id,
            route,
            cursor: 0,
            capacity,
            riders: Vec::new(),
            state: CarState::Pending,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> CarId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> CarState {
        self.state
    }

    /// Current station.
    #[inline]
    pub fn station(&self) -> StationId {
        // cursor never passes the last route position
        self.route.stations()[self.cursor]
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn destination(&self) -> StationId {
        self.route.destination()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Passengers aboard, in boarding order.
    pub fn riders(&self) -> &[PassengerId] {
        &self.riders
    }

    pub fn load(&self) -> usize {
        self.riders.len()
    }

    #[inline]
    pub fn has_space(&self) -> bool {
        self.riders.len() < self.capacity
    }

    /// The station the next `advance` will reach.
    pub fn next_station(&self) -> Option<StationId> {
        self.route.get(self.cursor + 1)
    }

    /// Line traversals left before the route is exhausted.
    pub fn remaining(&self) -> usize {
        self.route.len() - 1 - self.cursor
    }

    pub fn is_route_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// `true` if `station` lies strictly ahead on the route.
    pub fn covers(&self, station: StationId) -> bool {
        self.route.ahead_of(self.cursor).contains(&station)
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// `Pending → Moving`.  The car stays where it is.
    pub fn depart(&mut self) -> EntityResult<()> {
        if self.state != CarState::Pending {
            return Err(self.bad_state("depart"));
        }
        self.state = CarState::Moving;
        Ok(())
    }

    /// Traverse one line to the next route station.
    ///
    /// Returns the station reached and the line used.  The line is checked
    /// against `topology` so a route that does not belong to it is caught
    /// here rather than silently teleporting the car.
    pub fn advance(&mut self, topology: &Topology) -> EntityResult<(StationId, LineId)> {
        if self.state != CarState::Moving {
            return Err(self.bad_state("advance"));
        }
        let from = self.station();
        let to = self.next_station().ok_or(EntityError::RouteExhausted(self.id))?;
        let line = topology
            .line_between(from, to)
            .ok_or(EntityError::NotAdjacent { car: self.id, from, to })?;
        self.cursor += 1;
        Ok((to, line))
    }

    pub fn board(&mut self, passenger: PassengerId) -> EntityResult<()> {
        if self.state == CarState::Arrived {
            return Err(self.bad_state("board passengers"));
        }
        if !self.has_space() {
            return Err(EntityError::CarFull { car: self.id, capacity: self.capacity });
        }
        self.riders.push(passenger);
        Ok(())
    }

    pub fn alight(&mut self, passenger: PassengerId) -> EntityResult<()> {
        let pos = self
            .riders
            .iter()
            .position(|&p| p == passenger)
            .ok_or(EntityError::NotAboard { car: self.id, passenger })?;
        self.riders.remove(pos);
        Ok(())
    }

    /// Take the car out of service.  It must be empty.
    pub fn retire(&mut self) -> EntityResult<()> {
        if self.state == CarState::Arrived {
            return Err(self.bad_state("retire"));
        }
        if !self.riders.is_empty() {
            return Err(EntityError::RidersAboard { car: self.id, riders: self.riders.len() });
        }
        self.state = CarState::Arrived;
        Ok(())
    }

    /// Replace the route with one starting where the car stands.
    ///
    /// The car goes back to `Pending`: like a fresh spawn, its next step
    /// only departs it, so passengers waiting here get a chance to board.
    pub fn reroute(&mut self, route: Route) -> EntityResult<()> {
        if self.state == CarState::Arrived {
            return Err(self.bad_state("reroute"));
        }
        let at = self.station();
        if route.origin() != at {
            return Err(EntityError::RouteOriginMismatch {
                car: self.id,
                at,
                origin: route.origin(),
            });
        }
        self.route = route;
        self.cursor = 0;
        self.state = CarState::Pending;
        Ok(())
    }

    fn bad_state(&self, action: &'static str) -> EntityError {
        EntityError::InvalidCarState {
            car: self.id,
            state: self.state.as_str(),
            action,
        }
    }
}
