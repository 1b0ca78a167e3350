//! SQLite event log backend (feature `sqlite`).
//!
//! Entries go to a single `log` table:
//!
//! ```sql
//! CREATE TABLE log (
//!     id          INTEGER PRIMARY KEY AUTOINCREMENT,
//!     object_type CHAR(3),
//!     object_id   INTEGER,
//!     message     TEXT
//! );
//! ```

use std::path::Path;

use rusqlite::Connection;

use crate::{EventLog, ObjectType, OutputResult};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS log (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    object_type CHAR(3),
    object_id   INTEGER,
    message     TEXT
);";

/// Writes the event log to an SQLite database.
pub struct SqliteEventLog {
    conn:     Connection,
    finished: bool,
}

impl SqliteEventLog {
    /// Open (or create) the database at `path` and initialise the schema.
    /// Entries from earlier runs are kept; ids continue after them.
    pub fn open(path: &Path) -> OutputResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;",
        )?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> OutputResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> OutputResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn, finished: false })
    }

    /// Borrow the connection, e.g. to query the log after a run.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl EventLog for SqliteEventLog {
    fn record(&mut self, object_type: &ObjectType, object_id: u32, message: &str) -> OutputResult<u64> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO log (object_type, object_id, message) VALUES (?1, ?2, ?3)",
        )?;
        stmt.execute(rusqlite::params![object_type.as_str(), object_id, message])?;
        Ok(self.conn.last_insert_rowid() as u64)
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
