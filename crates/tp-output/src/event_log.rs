//! The `EventLog` trait implemented by all backends.

use crate::{ObjectType, OutputResult};

/// Append-only log of `(id, object_type, object_id, message)` entries.
///
/// Backends assign ids sequentially from 1 and never rewrite an entry.
pub trait EventLog {
    /// Append one entry and return the id it was given.
    fn record(&mut self, object_type: &ObjectType, object_id: u32, message: &str) -> OutputResult<u64>;

    /// Flush buffered entries.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<L: EventLog + ?Sized> EventLog for Box<L> {
    fn record(&mut self, object_type: &ObjectType, object_id: u32, message: &str) -> OutputResult<u64> {
        (**self).record(object_type, object_id, message)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}
