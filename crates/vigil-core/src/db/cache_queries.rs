//! Keyed slot reads and writes for the local cache.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const SELECT_SLOT_SQL: &str = "SELECT value FROM cache_slots WHERE key = ?1";
const UPSERT_SLOT_SQL: &str = "INSERT INTO cache_slots (key, value, updated_at) VALUES (?1, ?2, ?3)
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

impl super::Database {
    /// Reads the value stored under `key`, if any.
    pub fn load_slot(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_SLOT_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read cache slot")
    }

    /// Replaces the value stored under `key` in a single statement.
    pub fn save_slot(&self, key: &str, value: &str) -> Result<()> {
        self.connection
            .execute(
                UPSERT_SLOT_SQL,
                params![key, value, Timestamp::now().to_string()],
            )
            .db_context("Failed to write cache slot")?;
        Ok(())
    }
}
