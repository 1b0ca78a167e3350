//! `tp-entity` — cars, passengers, and the registry that owns them.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`state`]     | `CarState`, `PassengerState`                               |
//! | [`car`]       | `Car`: route cursor, riders, capacity                     |
//! | [`passenger`] | `Passenger`: origin/destination, non-owning car reference |
//! | [`registry`]  | `Registry`: id-ordered maps of all cars and passengers    |
//! | [`error`]     | `EntityError`, `EntityResult<T>`                           |
//!
//! # Movement model (one station per step)
//!
//! A car always stands at a station between steps.  Its position is the
//! station at `route[cursor]`; each `advance` traverses exactly one line and
//! moves the cursor forward by one.  There is no observable "between
//! stations" position.
//!
//! # Ownership
//!
//! The [`Registry`] owns every car and passenger.  Cross references are ids
//! only: a car lists its riders as `PassengerId`s and a passenger names its
//! carrier as `Option<CarId>`.  Neither keeps the other alive.

pub mod car;
pub mod error;
pub mod passenger;
pub mod registry;
pub mod state;


pub use car::Car;
pub use error::{EntityError, EntityResult};
pub use passenger::Passenger;
pub use registry::Registry;
pub use state::{CarState, PassengerState};
