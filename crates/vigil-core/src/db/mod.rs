//! SQLite storage shared by the local cache and the SQLite remote store.
//!
//! Both backends use the same embedded schema: the local cache keeps its
//! snapshot in `cache_slots`, while the remote store keeps the keyed plan
//! collection in `remote_entries` and a change counter in `remote_meta`.
//! A [`Database`] is opened per operation and dropped when it completes.
//! [`Database::new`] creates the schema and is called once per store; later
//! operations use [`Database::open`] or, for polling, the read-only
//! [`Database::open_read_only`].

use std::{path::Path, time::Duration};

use rusqlite::{Connection, OpenFlags};

use crate::error::{DatabaseResultExt, Result};

pub mod cache_queries;
pub mod migrations;
pub mod remote_queries;

/// How long a connection waits on a locked database before failing.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
#[derive(Debug)]
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens a connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = Self::open(path)?;
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a read-write connection to an initialized database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        Self::with_connection(connection)
    }

    /// Opens a connection that takes no write locks.
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connection = Connection::open_with_flags(path, flags)
            .db_context("Failed to open read-only database connection")?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;
        Ok(Self { connection })
    }
}
