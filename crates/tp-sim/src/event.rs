//! Transition events and per-step reports.

use std::fmt;

use tp_core::{CarId, LineId, PassengerId, StationId, Step};

/// The entity an event is about.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Subject {
    Car(CarId),
    Passenger(PassengerId),
}

impl Subject {
    /// Raw numeric id, for sinks that store ids untyped.
    pub fn raw_id(self) -> u32 {
        match self {
            Subject::Car(id)       => id.0,
            Subject::Passenger(id) => id.0,
        }
    }
}

/// One state transition.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SimEvent {
    CarSpawned {
        car:         CarId,
        origin:      StationId,
        destination: StationId,
        capacity:    usize,
    },
    PassengerSpawned {
        passenger:   PassengerId,
        origin:      StationId,
        destination: StationId,
    },
    CarMoved {
        car:  CarId,
        from: StationId,
        to:   StationId,
        line: LineId,
    },
    Boarded {
        passenger: PassengerId,
        car:       CarId,
        station:   StationId,
    },
    Alighted {
        passenger: PassengerId,
        car:       CarId,
        station:   StationId,
    },
    PassengerArrived {
        passenger: PassengerId,
        station:   StationId,
    },
    /// A car reached the end of its route.  Followed by `Regenerated` or
    /// `Retired`.
    CarArrived {
        car:     CarId,
        station: StationId,
    },
    Regenerated {
        car:         CarId,
        station:     StationId,
        destination: StationId,
    },
    Retired {
        car:     CarId,
        station: StationId,
    },
}

impl SimEvent {
    pub fn subject(&self) -> Subject {
        match *self {
            SimEvent::CarSpawned { car, .. }
            | SimEvent::CarMoved { car, .. }
            | SimEvent::CarArrived { car, .. }
            | SimEvent::Regenerated { car, .. }
            | SimEvent::Retired { car, .. } => Subject::Car(car),
            SimEvent::PassengerSpawned { passenger, .. }
            | SimEvent::Boarded { passenger, .. }
            | SimEvent::Alighted { passenger, .. }
            | SimEvent::PassengerArrived { passenger, .. } => Subject::Passenger(passenger),
        }
    }

    /// Short lowercase name of the transition.
    pub fn kind(&self) -> &'static str {
        match self {
            SimEvent::CarSpawned { .. } | SimEvent::PassengerSpawned { .. } => "spawn",
            SimEvent::CarMoved { .. }    => "move",
            SimEvent::Boarded { .. }     => "board",
            SimEvent::Alighted { .. }    => "alight",
            SimEvent::PassengerArrived { .. } | SimEvent::CarArrived { .. } => "arrive",
            SimEvent::Regenerated { .. } => "regenerate",
            SimEvent::Retired { .. }     => "retire",
        }
    }
}

/// Human-readable message, without the subject.
impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::CarSpawned { origin, destination, capacity, .. } => {
                write!(f, "spawned at {origin} bound for {destination} (capacity {capacity})")
            }
            SimEvent::PassengerSpawned { origin, destination, .. } => {
                write!(f, "spawned at {origin} bound for {destination}")
            }
            SimEvent::CarMoved { from, to, line, .. } => write!(f, "moved {from} -> {to} via {line}"),
            SimEvent::Boarded { car, station, .. }    => write!(f, "boarded {car} at {station}"),
            SimEvent::Alighted { car, station, .. }   => write!(f, "alighted {car} at {station}"),
            SimEvent::PassengerArrived { station, .. } | SimEvent::CarArrived { station, .. } => {
                write!(f, "arrived at {station}")
            }
            SimEvent::Regenerated { station, destination, .. } => {
                write!(f, "new route from {station} to {destination}")
            }
            SimEvent::Retired { station, .. } => write!(f, "retired at {station}"),
        }
    }
}

// ── StepReport ────────────────────────────────────────────────────────────────

/// Counters for one call to `Sim::step`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct StepReport {
    /// The step that was executed, or the current step if `idle`.
    pub step: Step,
    /// Nothing could change, so nothing was done.
    pub idle: bool,
    pub departed:           usize,
    pub moved:              usize,
    pub boarded:            usize,
    pub alighted:           usize,
    pub passengers_arrived: usize,
    pub cars_arrived:       usize,
    pub regenerated:        usize,
    pub retired:            usize,
}

impl StepReport {
    pub fn idle(step: Step) -> Self {
        Self { step, idle: true, ..Self::default() }
    }
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.idle {
            return write!(f, "{}: idle", self.step);
        }
        write!(
            f,
            "{}: {} departed, {} moved, {} boarded, {} alighted, {} passengers arrived, {} cars arrived ({} regenerated, {} retired)",
            self.step,
            self.departed,
            self.moved,
            self.boarded,
            self.alighted,
            self.passengers_arrived,
            self.cars_arrived,
            self.regenerated,
            self.retired,
        )
    }
}
