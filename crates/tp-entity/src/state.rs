//! Lifecycle states for cars and passengers.

use std::fmt;

/// Car lifecycle: `Pending → Moving → Arrived`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CarState {
    /// Spawned, has not departed yet.
    #[default]
    Pending,
    /// Travelling along its route.
    Moving,
    /// Reached the end of its route and was retired.
    Arrived,
}

impl CarState {
    /// `true` while the engine still steps this car.
    #[inline]
    pub fn is_active(self) -> bool {
        !matches!(self, CarState::Arrived)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CarState::Pending => "pending",
            CarState::Moving  => "moving",
            CarState::Arrived => "arrived",
        }
    }
}

impl fmt::Display for CarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Passenger lifecycle: `Waiting → Boarded → Arrived`, never backwards.
///
/// Variants are declared in lifecycle order so `Ord` compares progress.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassengerState {
    #[default]
    Waiting,
    Boarded,
    Arrived,
}

impl PassengerState {
    #[inline]
    pub fn is_active(self) -> bool {
        !matches!(self, PassengerState::Arrived)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PassengerState::Waiting => "waiting",
            PassengerState::Boarded => "boarded",
            PassengerState::Arrived => "arrived",
        }
    }
}

impl fmt::Display for PassengerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
