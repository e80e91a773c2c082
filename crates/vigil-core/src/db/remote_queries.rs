//! Entry and revision queries for the SQLite remote store.

use jiff::Timestamp;
use rusqlite::params;

use crate::error::{DatabaseResultExt, Result};

const SELECT_REVISION_SQL: &str = "SELECT revision FROM remote_meta WHERE id = 1";
const SELECT_ENTRIES_SQL: &str = "SELECT entry_key, body FROM remote_entries";
const DELETE_ENTRIES_SQL: &str = "DELETE FROM remote_entries";
const INSERT_ENTRY_SQL: &str = "INSERT INTO remote_entries (entry_key, body) VALUES (?1, ?2)";
const BUMP_REVISION_SQL: &str =
    "UPDATE remote_meta SET revision = revision + 1, updated_at = ?1 WHERE id = 1";

/// Keyed entries read from the remote tables with the revision they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRows {
    pub revision: i64,
    pub entries: Vec<(String, String)>,
}

impl super::Database {
    /// Current remote revision; `0` means nothing was ever written.
    pub fn remote_revision(&self) -> Result<i64> {
        self.connection
            .query_row(SELECT_REVISION_SQL, [], |row| row.get(0))
            .db_context("Failed to read remote revision")
    }

    /// Reads the revision and all entries in one transaction.
    pub fn read_remote(&mut self) -> Result<RemoteRows> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let revision: i64 = tx
            .query_row(SELECT_REVISION_SQL, [], |row| row.get(0))
            .db_context("Failed to read remote revision")?;

        let entries = {
            let mut stmt = tx
                .prepare(SELECT_ENTRIES_SQL)
                .db_context("Failed to prepare query")?;
            let rows = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
                .db_context("Failed to query remote entries")?;
            rows.collect::<rusqlite::Result<Vec<(String, String)>>>()
                .db_context("Failed to read remote entry")?
        };

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(RemoteRows { revision, entries })
    }

    /// Replaces every entry and bumps the revision atomically.
    ///
    /// Returns the new revision.
    pub fn replace_remote(&mut self, entries: &[(String, String)]) -> Result<i64> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_ENTRIES_SQL, [])
            .db_context("Failed to clear remote entries")?;
        {
            let mut stmt = tx
                .prepare(INSERT_ENTRY_SQL)
                .db_context("Failed to prepare insert")?;
            for (key, body) in entries {
                stmt.execute(params![key, body])
                    .db_context("Failed to insert remote entry")?;
            }
        }
        tx.execute(BUMP_REVISION_SQL, params![Timestamp::now().to_string()])
            .db_context("Failed to bump remote revision")?;
        let revision: i64 = tx
            .query_row(SELECT_REVISION_SQL, [], |row| row.get(0))
            .db_context("Failed to read remote revision")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(revision)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::db::Database;

    #[test]
    fn test_replace_bumps_revision() {
        let dir = TempDir::new().unwrap();
        let mut db = Database::new(dir.path().join("remote.db")).unwrap();
        assert_eq!(db.remote_revision().unwrap(), 0);

        let first = vec![
            ("0".to_string(), "{}".to_string()),
            ("1".to_string(), "{}".to_string()),
        ];
        assert_eq!(db.replace_remote(&first).unwrap(), 1);
        assert_eq!(db.replace_remote(&first[..1]).unwrap(), 2);

        let rows = db.read_remote().unwrap();
        assert_eq!(rows.revision, 2);
        assert_eq!(rows.entries, vec![("0".to_string(), "{}".to_string())]);
    }

    #[test]
    fn test_reopen_keeps_revision() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("remote.db");
        Database::new(&path)
            .unwrap()
            .replace_remote(&[("0".to_string(), "{}".to_string())])
            .unwrap();

        assert_eq!(Database::new(&path).unwrap().remote_revision().unwrap(), 1);
    }

    #[test]
    fn test_read_only_connection_reads_but_never_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("remote.db");
        Database::new(&path)
            .unwrap()
            .replace_remote(&[("0".to_string(), "{}".to_string())])
            .unwrap();

        let mut reader = Database::open_read_only(&path).unwrap();
        assert_eq!(reader.remote_revision().unwrap(), 1);
        assert_eq!(reader.read_remote().unwrap().entries.len(), 1);
        assert!(reader.replace_remote(&[]).is_err());
        assert_eq!(Database::open(&path).unwrap().remote_revision().unwrap(), 1);
    }

    #[test]
    fn test_read_only_open_requires_existing_file() {
        let dir = TempDir::new().unwrap();
        assert!(Database::open_read_only(dir.path().join("missing.db")).is_err());
    }
}
