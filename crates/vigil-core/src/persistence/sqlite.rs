//! SQLite-backed cache and remote store.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::time::MissedTickBehavior;

use rusqlite::ErrorCode;

use super::{
    decode_payload, encode_payload, DeliveryGate, LocalCache, RemotePayload, RemoteSnapshot,
    RemoteStore, SnapshotHandler, Subscription, PLANS_SLOT,
};
use crate::{
    db::Database,
    error::{Result, SyncError, VigilError},
    models::OperationPlan,
};

/// How often remote subscribers check for a new revision by default.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Local cache stored in a single keyed slot of a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteCache {
    path: PathBuf,
}

impl SqliteCache {
    /// Opens (creating if needed) the cache database at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        Database::new(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocalCache for SqliteCache {
    fn load(&self) -> Result<Option<Vec<OperationPlan>>> {
        let db = Database::open(&self.path)?;
        match db.load_slot(PLANS_SLOT)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, plans: &[OperationPlan]) -> Result<()> {
        let json = serde_json::to_string(plans)?;
        Database::open(&self.path)?.save_slot(PLANS_SLOT, &json)
    }
}

/// Shared store kept in a SQLite file reachable by every device.
///
/// Writes replace all entries and bump a revision counter in one
/// transaction. Subscribers poll the revision over read-only connections and
/// deliver a fresh snapshot whenever it moves.
#[derive(Debug, Clone)]
pub struct SqliteRemote {
    path: PathBuf,
    poll_interval: Duration,
}

impl SqliteRemote {
    /// Opens (creating if needed) the remote database at `path`.
    ///
    /// The schema is created here once; reads and writes afterwards skip it.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        Database::new(&path)?;
        Ok(Self {
            path,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Sets how often subscribers check for changes.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_revision(path: PathBuf) -> std::result::Result<u64, SyncError> {
        let revision =
            tokio::task::spawn_blocking(move || Database::open_read_only(&path)?.remote_revision())
                .await
                .map_err(|e| SyncError::Task(e.to_string()))?
                .map_err(backend_error)?;
        Ok(as_revision(revision))
    }

    async fn read_snapshot(path: PathBuf) -> std::result::Result<RemoteSnapshot, SyncError> {
        let rows =
            tokio::task::spawn_blocking(move || Database::open_read_only(&path)?.read_remote())
                .await
                .map_err(|e| SyncError::Task(e.to_string()))?
                .map_err(backend_error)?;

        let mut payload = RemotePayload::new();
        for (key, body) in rows.entries {
            payload.insert(key, serde_json::from_str(&body)?);
        }
        Ok(RemoteSnapshot {
            revision: as_revision(rows.revision),
            plans: decode_payload(payload),
        })
    }
}

fn as_revision(stored: i64) -> u64 {
    u64::try_from(stored).unwrap_or(0)
}

/// Maps a storage failure into the remote error space.
///
/// Read-only files, permission and quota failures count as rejections.
fn backend_error(err: VigilError) -> SyncError {
    match err {
        VigilError::Database { message, source } if is_rejection(&source) => {
            SyncError::Rejected(format!("{message}: {source}"))
        }
        VigilError::Database { message, source } => SyncError::Backend { message, source },
        other => SyncError::Unavailable(other.to_string()),
    }
}

fn is_rejection(err: &rusqlite::Error) -> bool {
    matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ReadOnly | ErrorCode::PermissionDenied | ErrorCode::DiskFull)
    )
}

#[async_trait]
impl RemoteStore for SqliteRemote {
    fn backend_tag(&self) -> &'static str {
        "sqlite"
    }

    async fn save(&self, plans: &[OperationPlan]) -> std::result::Result<u64, SyncError> {
        let entries = encode_payload(plans)
            .into_iter()
            .map(|(key, plan)| serde_json::to_string(&plan).map(|body| (key, body)))
            .collect::<std::result::Result<Vec<_>, serde_json::Error>>()?;

        let path = self.path.clone();
        let revision = tokio::task::spawn_blocking(move || {
            Database::open(&path)?.replace_remote(&entries)
        })
        .await
        .map_err(|e| SyncError::Task(e.to_string()))?
        .map_err(backend_error)?;

        debug!("Remote revision {revision} written with {} plans", plans.len());
        Ok(as_revision(revision))
    }

    async fn subscribe(
        &self,
        handler: SnapshotHandler,
    ) -> std::result::Result<Subscription, SyncError> {
        let gate = DeliveryGate::new();
        let initial = Self::read_snapshot(self.path.clone()).await?;
        let mut seen = initial.revision;
        if initial.revision > 0 {
            gate.deliver(&handler, initial);
        }

        let path = self.path.clone();
        let interval = self.poll_interval;
        let task_gate = gate.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                match Self::read_revision(path.clone()).await {
                    Ok(revision) if revision == seen => continue,
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Remote poll failed: {e}");
                        continue;
                    }
                }
                match Self::read_snapshot(path.clone()).await {
                    Ok(snapshot) => {
                        seen = snapshot.revision;
                        debug!("Remote revision {seen} observed");
                        if !task_gate.deliver(&handler, snapshot) {
                            break;
                        }
                    }
                    Err(e) => warn!("Remote read failed: {e}"),
                }
            }
        });

        Ok(Subscription::new(gate, task))
    }
}
