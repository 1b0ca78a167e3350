//! Passengers.

use tp_core::{CarId, PassengerId, StationId};
use tp_topology::Route;

use crate::{EntityError, EntityResult, PassengerState};

/// A traveller waiting for, riding in, or done with a car.
///
/// `route` is the shortest path computed at spawn time; it fixes origin and
/// destination but does not constrain which car the passenger takes.
#[derive(Clone, Debug)]
pub struct Passenger {
    id:      PassengerId,
    route:   Route,
    station: StationId,
    state:   PassengerState,
    car:     Option<CarId>,
}

impl Passenger {
    pub fn new(id: PassengerId, route: Route) -> Self {
        let station = route.origin();
        Self {
            id,
            route,
            station,
            state: PassengerState::Waiting,
            car: None,
        }
    }

    #[inline]
    pub fn id(&self) -> PassengerId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> PassengerState {
        self.state
    }

    pub fn origin(&self) -> StationId {
        self.route.origin()
    }

    pub fn destination(&self) -> StationId {
        self.route.destination()
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Where the passenger is now.  While boarded this follows the car.
    #[inline]
    pub fn station(&self) -> StationId {
        self.station
    }

    /// The carrying car, if boarded.
    #[inline]
    pub fn car(&self) -> Option<CarId> {
        self.car
    }

    pub fn is_at_destination(&self) -> bool {
        self.station == self.route.destination()
    }

    /// `Waiting → Boarded` onto `car`.
    pub fn board(&mut self, car: CarId) -> EntityResult<()> {
        if self.state != PassengerState::Waiting {
            return Err(self.bad_state("board"));
        }
        self.state = PassengerState::Boarded;
        self.car = Some(car);
        Ok(())
    }

    /// Follow the carrying car to `station`.
    pub fn ride_to(&mut self, station: StationId) -> EntityResult<()> {
        if self.state != PassengerState::Boarded {
            return Err(self.bad_state("ride"));
        }
        self.station = station;
        Ok(())
    }

    /// Reach the destination, clearing the car reference.
    ///
    /// Valid from `Waiting` (spawned at the destination) or `Boarded`, and
    /// only when standing at the destination.
    pub fn arrive(&mut self) -> EntityResult<()> {
        if self.state == PassengerState::Arrived || !self.is_at_destination() {
            return Err(self.bad_state("arrive"));
        }
        self.state = PassengerState::Arrived;
        self.car = None;
        Ok(())
    }

    fn bad_state(&self, action: &'static str) -> EntityError {
        EntityError::InvalidPassengerState {
            passenger: self.id,
            state: self.state.as_str(),
            action,
        }
    }
}
