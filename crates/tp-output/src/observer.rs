//! `EventLogObserver<L>`: bridges `SimObserver` to an `EventLog`.

use log::warn;

use tp_core::Step;
use tp_sim::{SimEvent, SimObserver};

use crate::{EventLog, ObjectType, OutputError, OutputResult};

/// A [`SimObserver`] that appends every simulation event to an [`EventLog`]
/// backend (memory, CSV, SQLite, …).
///
/// Messages are prefixed with the step, e.g. `S2 boarded CarId(0) at
/// StationId(1)`.  When the run ends a `sys` entry is written and the log is
/// finished.
///
/// Errors from the log are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct EventLogObserver<L: EventLog> {
    log:        L,
    last_error: Option<OutputError>,
}

impl<L: EventLog> EventLogObserver<L> {
    pub fn new(log: L) -> Self {
        Self { log, last_error: None }
    }

    /// Write a free-form `sys` entry, e.g. a run header.
    pub fn note(&mut self, message: &str) -> OutputResult<u64> {
        self.log.record(&ObjectType::sys(), 0, message)
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Unwrap the inner log (e.g. to inspect entries after the sim).
    pub fn into_log(self) -> L {
        self.log
    }

    fn store_err<T>(&mut self, result: OutputResult<T>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("event log write failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<L: EventLog> SimObserver for EventLogObserver<L> {
    fn on_event(&mut self, step: Step, event: &SimEvent) {
        let subject = event.subject();
        let message = format!("{step} {event}");
        let result = self.log.record(&ObjectType::from(subject), subject.raw_id(), &message);
        self.store_err(result);
    }

    fn on_run_end(&mut self, final_step: Step) {
        let result = self.note(&format!("run finished at {final_step}"));
        self.store_err(result);
        let result = self.log.finish();
        self.store_err(result);
    }
}
