//! Database schema initialization.

use jiff::Timestamp;
use rusqlite::params;

use crate::error::{DatabaseResultExt, Result};

const SEED_REMOTE_META_SQL: &str =
    "INSERT OR IGNORE INTO remote_meta (id, revision, updated_at) VALUES (1, 0, ?1)";

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.seed_remote_meta()
    }

    /// Ensures the single revision row exists so writers can bump it.
    fn seed_remote_meta(&self) -> Result<()> {
        self.connection
            .execute(SEED_REMOTE_META_SQL, params![Timestamp::now().to_string()])
            .db_context("Failed to seed remote revision")?;
        Ok(())
    }
}
