//! Simulation configuration.

use std::fmt;
use std::str::FromStr;

use crate::{SimClock, Step, TpError, TpResult};

// ── CarArrivalPolicy ──────────────────────────────────────────────────────────

/// What happens to a car once it reaches the last station of its route.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CarArrivalPolicy {
    /// The car stays in the registry as `arrived` and is never stepped again.
    #[default]
    Retire,
    /// The car is given a fresh random route from where it stands and keeps
    /// moving.  Falls back to `Retire` when no random route exists.
    Regenerate,
}

impl CarArrivalPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            CarArrivalPolicy::Retire     => "retire",
            CarArrivalPolicy::Regenerate => "regenerate",
        }
    }
}

impl fmt::Display for CarArrivalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarArrivalPolicy {
    type Err = TpError;

    fn from_str(s: &str) -> TpResult<Self> {
        match s {
            "retire"     => Ok(CarArrivalPolicy::Retire),
            "regenerate" => Ok(CarArrivalPolicy::Regenerate),
            other        => Err(TpError::Parse(format!("unknown car arrival policy `{other}`"))),
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically deserialized from JSON by the application (feature `serde`) and
/// handed to `SimBuilder`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Passenger capacity for cars spawned without an explicit capacity.
    pub default_car_capacity: usize,

    /// Policy applied when a car exhausts its route.
    pub arrival_policy: CarArrivalPolicy,

    /// Steps executed by `Sim::run`.
    pub total_steps: u64,

    /// Duration of one step in `step_units`.
    pub step_duration: u32,

    /// Unit label for reports.
    pub step_units: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                 42,
            default_car_capacity: 20,
            arrival_policy:       CarArrivalPolicy::Retire,
            total_steps:          1000,
            step_duration:        1,
            step_units:           "s".to_owned(),
        }
    }
}

impl SimConfig {
    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> TpResult<()> {
        if self.default_car_capacity == 0 {
            return Err(TpError::Config("default_car_capacity must be at least 1".into()));
        }
        if self.step_duration == 0 {
            return Err(TpError::Config("step_duration must be at least 1".into()));
        }
        Ok(())
    }

    /// The step at which `Sim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_step(&self) -> Step {
        Step(self.total_steps)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.step_duration, self.step_units.clone())
    }
}
