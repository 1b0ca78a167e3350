//! CSV event log backend.
//!
//! One file with the header `id,object_type,object_id,message`.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{EventLog, ObjectType, OutputResult};

/// Writes the event log to a single CSV file.
pub struct CsvEventLog {
    writer:   Writer<File>,
    next_id:  u64,
    finished: bool,
}

impl CsvEventLog {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(["id", "object_type", "object_id", "message"])?;
        Ok(Self {
            writer,
            next_id: 1,
            finished: false,
        })
    }
}

impl EventLog for CsvEventLog {
    fn record(&mut self, object_type: &ObjectType, object_id: u32, message: &str) -> OutputResult<u64> {
        let id = self.next_id;
        self.writer.write_record([
            id.to_string().as_str(),
            object_type.as_str(),
            object_id.to_string().as_str(),
            message,
        ])?;
        self.next_id += 1;
        Ok(id)
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}
