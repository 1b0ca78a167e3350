//! `tp-output` — event log sinks and statistics export.
//!
//! The simulation reports every transition as a `SimEvent`.  This crate
//! turns them into entries of an append-only log:
//!
//! ```text
//! (id, object_type, object_id, message)
//!  autoincrement   3-char tag: `sys`, `car`, `pgr`
//! ```
//!
//! | Feature   | Backend               | Storage                       |
//! |-----------|-----------------------|-------------------------------|
//! | *(none)*  | [`MemoryEventLog`]    | `Vec<LogEntry>`               |
//! | *(none)*  | [`CsvEventLog`]       | one CSV file                  |
//! | `sqlite`  | `SqliteEventLog`      | `log` table in an SQLite file |
//!
//! All backends implement [`EventLog`] and are driven by
//! [`EventLogObserver`], which implements `tp_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tp_output::{CsvEventLog, EventLogObserver};
//!
//! let log = CsvEventLog::create(Path::new("./events.csv"))?;
//! let mut sim = SimBuilder::seeded(topology, config)
//!     .observer(EventLogObserver::new(log))
//!     .build()?;
//! sim.run()?;
//! if let Some(e) = sim.observer_mut().take_error() {
//!     eprintln!("event log error: {e}");
//! }
//! ```

pub mod csv;
pub mod entry;
pub mod error;
pub mod event_log;
pub mod memory;
pub mod observer;
pub mod stats;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvEventLog;
pub use entry::{LogEntry, ObjectType};
pub use error::{OutputError, OutputResult};
pub use event_log::EventLog;
pub use memory::MemoryEventLog;
pub use observer::EventLogObserver;
pub use stats::{write_stat_csv, write_stat_csv_path};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteEventLog;
