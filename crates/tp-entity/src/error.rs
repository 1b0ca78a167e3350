use thiserror::Error;

use tp_core::{CarId, PassengerId, StationId};

#[derive(Debug, Error)]
pub enum EntityError {
    #[error("car {car} is {state} and cannot {action}")]
    InvalidCarState {
        car:    CarId,
        state:  &'static str,
        action: &'static str,
    },

    #[error("passenger {passenger} is {state} and cannot {action}")]
    InvalidPassengerState {
        passenger: PassengerId,
        state:     &'static str,
        action:    &'static str,
    },

    #[error("passenger {0} is not in the registry")]
    UnknownPassenger(PassengerId),

    #[error("car {0} has no stations left on its route")]
    RouteExhausted(CarId),

    #[error("car {car}: no line between {from} and {to}")]
    NotAdjacent {
        car:  CarId,
        from: StationId,
        to:   StationId,
    },

    #[error("car {car} is full ({capacity} passengers)")]
    CarFull { car: CarId, capacity: usize },

    #[error("passenger {passenger} is not aboard car {car}")]
    NotAboard { car: CarId, passenger: PassengerId },

    #[error("car {car} cannot retire with {riders} passengers aboard")]
    RidersAboard { car: CarId, riders: usize },

    #[error("car {car} at {at} cannot take a route starting at {origin}")]
    RouteOriginMismatch {
        car:    CarId,
        at:     StationId,
        origin: StationId,
    },
}

pub type EntityResult<T> = Result<T, EntityError>;
