//! In-memory event log.

use crate::{EventLog, LogEntry, ObjectType, OutputResult};

/// Keeps every entry in a `Vec`.  Useful for tests and short runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryEventLog {
    entries: Vec<LogEntry>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

impl EventLog for MemoryEventLog {
    fn record(&mut self, object_type: &ObjectType, object_id: u32, message: &str) -> OutputResult<u64> {
        let id = self.entries.len() as u64 + 1;
        self.entries.push(LogEntry {
            id,
            object_type: object_type.clone(),
            object_id,
            message: message.to_owned(),
        });
        Ok(id)
    }

    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}
