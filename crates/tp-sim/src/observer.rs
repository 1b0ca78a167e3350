//! Simulation observer trait for event logging and progress reporting.

use tp_core::Step;

use crate::{SimEvent, StepReport};

/// Callbacks invoked by the [`Sim`][crate::Sim].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// Events from a step are delivered only after the step has committed.
/// Spawn events are delivered immediately, tagged with the current step.
///
/// # Example
///
/// ```rust,ignore
/// struct ArrivalCounter(usize);
///
/// impl SimObserver for ArrivalCounter {
///     fn on_event(&mut self, _step: Step, event: &SimEvent) {
///         if let SimEvent::PassengerArrived { .. } = event {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    fn on_event(&mut self, _step: Step, _event: &SimEvent) {}

    /// Called after each committed, non-idle step.
    fn on_step_end(&mut self, _report: &StepReport) {}

    /// Called once when `Sim::run` returns normally.
    fn on_run_end(&mut self, _final_step: Step) {}
}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_event(&mut self, step: Step, event: &SimEvent) {
        (**self).on_event(step, event);
    }

    fn on_step_end(&mut self, report: &StepReport) {
        (**self).on_step_end(report);
    }

    fn on_run_end(&mut self, final_step: Step) {
        (**self).on_run_end(final_step);
    }
}

/// A [`SimObserver`] that does nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Keeps every event and report in memory.
#[derive(Clone, Debug, Default)]
pub struct EventCollector {
    pub events:  Vec<(Step, SimEvent)>,
    pub reports: Vec<StepReport>,
    pub finished_at: Option<Step>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events of the given [`SimEvent::kind`].
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a SimEvent> + 'a {
        self.events.iter().map(|(_, e)| e).filter(move |e| e.kind() == kind)
    }
}

impl SimObserver for EventCollector {
    fn on_event(&mut self, step: Step, event: &SimEvent) {
        self.events.push((step, event.clone()));
    }

    fn on_step_end(&mut self, report: &StepReport) {
        self.reports.push(*report);
    }

    fn on_run_end(&mut self, final_step: Step) {
        self.finished_at = Some(final_step);
    }
}
