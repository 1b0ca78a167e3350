//! Simulation step model.
//!
//! Time is a monotonically increasing `Step` counter.  A step has no physical
//! meaning by itself; `SimClock` attaches an optional duration and unit label
//! so reports can read "step 12 (12 min)".
//!
//!   elapsed = step * step_duration   (in `units`)

use std::fmt;

// ── Step ──────────────────────────────────────────────────────────────────────

/// An absolute step counter.  Step 0 is the state before the first `step()`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// Return the step `n` after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Step {
        Step(self.0 + n)
    }
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl std::ops::Sub for Step {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Step) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current step and maps it to elapsed time in arbitrary units.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many `units` one step represents.
    pub step_duration: u32,
    /// Unit label, e.g. `"s"`, `"min"`, `"h"`.
    pub units: String,
    /// The current step, advanced once per non-idle `step()`.
    pub current_step: Step,
}

impl SimClock {
    pub fn new(step_duration: u32, units: impl Into<String>) -> Self {
        Self {
            step_duration,
            units: units.into(),
            current_step: Step::ZERO,
        }
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.current_step = Step(self.current_step.0 + 1);
    }

    /// Elapsed time since step 0, in `units`.
    #[inline]
    pub fn elapsed(&self) -> u64 {
        self.current_step.0 * self.step_duration as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.current_step, self.elapsed(), self.units)
    }
}
