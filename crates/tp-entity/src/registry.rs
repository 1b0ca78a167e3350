//! The `Registry`: every car and passenger, keyed and ordered by id.
//!
//! # Layout
//!
//! Entities sit behind `Arc`, so cloning the registry for a step copies
//! pointers and a step deep-copies only the entities it actually touches
//! (`Arc::make_mut`).  Waiting passengers are additionally indexed by
//! station:
//!
//! ```text
//! waiting: BTreeMap<StationId, BTreeSet<PassengerId>>
//! ```
//!
//! The index is kept in sync by routing every passenger transition through
//! the registry (`board_passenger`, `ride_passenger`, `arrive_passenger`), so
//! boarding at a station costs O(waiting there) rather than O(all spawns).

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use log::trace;

use tp_core::{CarId, PassengerId, StationId};
use tp_topology::Route;

use crate::{Car, CarState, EntityError, EntityResult, Passenger, PassengerState};

/// Canonical store of all cars and passengers.
///
/// Ids are allocated sequentially and never reused, so `BTreeMap` order is
/// spawn order.  Arrived entities stay in the maps for statistics.
///
/// The registry is `Clone` so a step can run against a copy and be committed
/// only when it succeeds.
#[derive(Clone, Debug)]
pub struct Registry {
    cars:           BTreeMap<CarId, Arc<Car>>,
    passengers:     BTreeMap<PassengerId, Arc<Passenger>>,
    waiting:        BTreeMap<StationId, BTreeSet<PassengerId>>,
    next_car:       CarId,
    next_passenger: PassengerId,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            cars:           BTreeMap::new(),
            passengers:     BTreeMap::new(),
            waiting:        BTreeMap::new(),
            next_car:       CarId(0),
            next_passenger: PassengerId(0),
        }
    }

    // ── Insertion ─────────────────────────────────────────────────────────

    /// Register a new pending car on `route`.
    pub fn add_car(&mut self, route: Route, capacity: usize) -> CarId {
        let id = self.next_car;
        self.next_car = id.next();
        trace!("registry: {id} added on {route}");
        self.cars.insert(id, Arc::new(Car::new(id, route, capacity)));
        id
    }

    /// Register a new waiting passenger on `route`.
    pub fn add_passenger(&mut self, route: Route) -> PassengerId {
        let id = self.next_passenger;
        self.next_passenger = id.next();
        trace!("registry: {id} added on {route}");
        self.waiting.entry(route.origin()).or_default().insert(id);
        self.passengers.insert(id, Arc::new(Passenger::new(id, route)));
        id
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn car(&self, id: CarId) -> Option<&Car> {
        self.cars.get(&id).map(Arc::as_ref)
    }

    /// Mutable access to a car.  Copies it first if a snapshot shares it.
    pub fn car_mut(&mut self, id: CarId) -> Option<&mut Car> {
        self.cars.get_mut(&id).map(Arc::make_mut)
    }

    pub fn passenger(&self, id: PassengerId) -> Option<&Passenger> {
        self.passengers.get(&id).map(Arc::as_ref)
    }

    // ── Passenger transitions ─────────────────────────────────────────────

    /// `Waiting → Boarded` onto `car`; leaves the station's waiting index.
    pub fn board_passenger(&mut self, id: PassengerId, car: CarId) -> EntityResult<()> {
        let p = self.passenger_entry(id)?;
        let station = p.station();
        p.board(car)?;
        self.unindex(station, id);
        Ok(())
    }

    /// Move a boarded passenger along with its car.
    pub fn ride_passenger(&mut self, id: PassengerId, station: StationId) -> EntityResult<()> {
        self.passenger_entry(id)?.ride_to(station)
    }

    /// Mark a passenger standing at its destination as arrived.
    pub fn arrive_passenger(&mut self, id: PassengerId) -> EntityResult<()> {
        let p = self.passenger_entry(id)?;
        let was_waiting = p.state() == PassengerState::Waiting;
        let station = p.station();
        p.arrive()?;
        if was_waiting {
            self.unindex(station, id);
        }
        Ok(())
    }

    fn passenger_entry(&mut self, id: PassengerId) -> EntityResult<&mut Passenger> {
        self.passengers
            .get_mut(&id)
            .map(Arc::make_mut)
            .ok_or(EntityError::UnknownPassenger(id))
    }

    fn unindex(&mut self, station: StationId, id: PassengerId) {
        if let Some(set) = self.waiting.get_mut(&station) {
            set.remove(&id);
            if set.is_empty() {
                self.waiting.remove(&station);
            }
        }
    }

    // ── Iteration (ascending id) ──────────────────────────────────────────

    pub fn cars(&self) -> impl Iterator<Item = &Car> + '_ {
        self.cars.values().map(Arc::as_ref)
    }

    pub fn passengers(&self) -> impl Iterator<Item = &Passenger> + '_ {
        self.passengers.values().map(Arc::as_ref)
    }

    /// Snapshot of car ids, for loops that mutate while walking.
    pub fn car_ids(&self) -> Vec<CarId> {
        self.cars.keys().copied().collect()
    }

    pub fn passenger_ids(&self) -> Vec<PassengerId> {
        self.passengers.keys().copied().collect()
    }

    /// Non-arrived cars standing at `station`.
    pub fn cars_at(&self, station: StationId) -> impl Iterator<Item = &Car> + '_ {
        self.cars()
            .filter(move |c| c.state().is_active() && c.station() == station)
    }

    /// Waiting passengers at `station`, ascending id.
    pub fn waiting_at(&self, station: StationId) -> impl Iterator<Item = &Passenger> + '_ {
        self.waiting
            .get(&station)
            .into_iter()
            .flatten()
            .filter_map(|id| self.passenger(*id))
    }

    /// Waiting passengers already standing at their destination, ascending
    /// id.
    pub fn waiting_at_destination(&self) -> Vec<PassengerId> {
        let mut out: Vec<PassengerId> = self
            .waiting
            .iter()
            .flat_map(|(&station, ids)| {
                ids.iter()
                    .copied()
                    .filter(move |id| self.passenger(*id).is_some_and(|p| p.destination() == station))
            })
            .collect();
        out.sort_unstable();
        out
    }

    // ── Counts ────────────────────────────────────────────────────────────

    pub fn car_count(&self) -> usize {
        self.cars.len()
    }

    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty() && self.passengers.is_empty()
    }

    /// Cars that are still `Pending` or `Moving`.
    pub fn active_car_count(&self) -> usize {
        self.cars().filter(|c| c.state().is_active()).count()
    }

    pub fn count_cars_in(&self, state: CarState) -> usize {
        self.cars().filter(|c| c.state() == state).count()
    }

    pub fn count_passengers_in(&self, state: PassengerState) -> usize {
        match state {
            PassengerState::Waiting => self.waiting.values().map(BTreeSet::len).sum(),
            _ => self.passengers().filter(|p| p.state() == state).count(),
        }
    }
}
