//! `tp-sim` — the step engine for the tpnet transport simulation.
//!
//! # Step phases
//!
//! ```text
//! step():
//!   ① Alight   : waiting passengers already at their destination arrive.
//!                 Riders leave their car in ④ of the step that brings
//!                 them there, so none is left aboard at its destination.
//!   ② Advance  : pending cars depart (without moving); moving cars traverse
//!                 exactly one line.  Riders move with their car.
//!   ③ Board    : per station, cars in ascending CarId take waiting
//!                 passengers in ascending PassengerId whose destination lies
//!                 ahead on the car's route, up to capacity.
//!   ④ Complete : riders at their destination arrive; cars with exhausted
//!                 routes are retired or regenerated (`CarArrivalPolicy`).
//!                 A regenerated car is pending again and departs next step.
//! ```
//!
//! A step runs against a copy of the registry and router and is committed
//! only when every phase succeeds.  Events are buffered and handed to the
//! [`SimObserver`] after commit, so observers never see a step that was
//! rolled back.
//!
//! A quiescent simulation (no pending or moving cars, nobody able to change
//! state) is not stepped at all: `step()` returns an idle report and the
//! step counter stays put.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tp_core::SimConfig;
//! use tp_sim::{SimBuilder, SpawnTarget};
//! use tp_topology::TopologySpec;
//!
//! let topology = TopologySpec::Ring { size: 6 }.build()?;
//! let mut sim = SimBuilder::seeded(topology, SimConfig::default()).build()?;
//! sim.spawn_cars("S0", SpawnTarget::Random, 3)?;
//! sim.spawn_passenger("S0", SpawnTarget::Destination("S3".into()))?;
//! sim.run()?;
//! ```

pub mod builder;
pub mod error;
pub mod event;
pub mod observer;
mod phases;
pub mod sim;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use event::{SimEvent, StepReport, Subject};
pub use observer::{EventCollector, NoopObserver, SimObserver};
pub use sim::{Sim, SpawnTarget};
pub use stats::{CarRow, Labels, PassengerRow, StatKind, StatTable, StationRow};
