//! Log entry types.

use std::fmt;
use std::str::FromStr;

use tp_sim::Subject;

use crate::{OutputError, OutputResult};

/// Longest allowed object type tag.
pub const MAX_TAG_LEN: usize = 3;

/// Short tag naming the kind of object a log entry is about.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ObjectType(String);

impl ObjectType {
    /// Validate a custom tag.
    pub fn new(tag: &str) -> OutputResult<Self> {
        let valid = !tag.is_empty()
            && tag.len() <= MAX_TAG_LEN
            && tag.bytes().all(|b| b.is_ascii_alphanumeric());
        if !valid {
            return Err(OutputError::InvalidTag(tag.to_owned()));
        }
        Ok(ObjectType(tag.to_owned()))
    }

    /// Simulation-wide entries.
    pub fn sys() -> Self {
        ObjectType("sys".to_owned())
    }

    pub fn car() -> Self {
        ObjectType("car".to_owned())
    }

    pub fn pgr() -> Self {
        ObjectType("pgr".to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Subject> for ObjectType {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::Car(_)       => ObjectType::car(),
            Subject::Passenger(_) => ObjectType::pgr(),
        }
    }
}

impl FromStr for ObjectType {
    type Err = OutputError;

    fn from_str(s: &str) -> OutputResult<Self> {
        ObjectType::new(s)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the event log.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LogEntry {
    /// Assigned by the log, starting at 1.
    pub id:          u64,
    pub object_type: ObjectType,
    pub object_id:   u32,
    pub message:     String,
}
