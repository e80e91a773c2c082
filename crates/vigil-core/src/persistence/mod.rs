//! Persistence adapters for the plan list.
//!
//! Two seams are defined here:
//!
//! - [`LocalCache`]: a durable, synchronous store for the last known snapshot
//!   on this device. It is read once at startup and written after every
//!   mutation and every remote notification.
//! - [`RemoteStore`]: the shared store every device writes its full snapshot
//!   to and subscribes to for changes. Writes replace the whole collection;
//!   there is no merge.
//!
//! SQLite implementations live in [`sqlite`], in-memory fakes in [`memory`],
//! stand-ins for stores that could not be opened in [`offline`] and the keyed
//! remote payload shape in [`payload`].

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::{
    error::{Result, SyncError},
    models::OperationPlan,
};

pub mod memory;
pub mod offline;
pub mod payload;
pub mod sqlite;

pub use memory::{MemoryCache, MemoryRemote};
pub use offline::{OfflineRemote, UnavailableCache};
pub use payload::{decode_payload, encode_payload, RemotePayload};
pub use sqlite::{SqliteCache, SqliteRemote, DEFAULT_POLL_INTERVAL};

/// Key of the single cache slot holding the plan snapshot.
pub const PLANS_SLOT: &str = "plans";

/// Remote contents at one revision.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteSnapshot {
    /// Store-wide write counter; a higher revision is a newer state
    pub revision: u64,
    pub plans: Vec<OperationPlan>,
}

/// Callback receiving every snapshot a remote subscription delivers.
pub type SnapshotHandler = Arc<dyn Fn(RemoteSnapshot) + Send + Sync>;

/// Durable per-device snapshot storage.
pub trait LocalCache: Send + Sync {
    /// Returns the stored snapshot, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<Vec<OperationPlan>>>;

    /// Replaces the stored snapshot atomically.
    fn save(&self, plans: &[OperationPlan]) -> Result<()>;
}

/// Shared store that all devices synchronize through.
#[async_trait]
pub trait RemoteStore: Send + Sync + 'static {
    /// Short name used in logs.
    fn backend_tag(&self) -> &'static str;

    /// Replaces the whole remote collection with `plans`.
    ///
    /// Returns the revision this write produced.
    async fn save(&self, plans: &[OperationPlan]) -> std::result::Result<u64, SyncError>;

    /// Starts delivering snapshots to `handler`.
    ///
    /// When the store already holds data, the current snapshot is delivered
    /// before this returns. Every later change is delivered in order until
    /// the returned [`Subscription`] is cancelled or dropped.
    async fn subscribe(
        &self,
        handler: SnapshotHandler,
    ) -> std::result::Result<Subscription, SyncError>;
}

/// Gate shared between a subscription and its delivery task.
///
/// Delivery happens while holding the lock, so once [`Subscription::cancel`]
/// returns no handler call is in flight and none will follow.
#[derive(Clone)]
pub struct DeliveryGate {
    open: Arc<Mutex<bool>>,
}

impl DeliveryGate {
    pub fn new() -> Self {
        Self {
            open: Arc::new(Mutex::new(true)),
        }
    }

    /// Calls `handler` with `snapshot` unless the gate is closed.
    ///
    /// Returns `false` once the gate is closed so loops can stop.
    pub fn deliver(&self, handler: &SnapshotHandler, snapshot: RemoteSnapshot) -> bool {
        let open = self.open.lock().unwrap_or_else(|e| e.into_inner());
        if *open {
            handler(snapshot);
        }
        *open
    }

    pub fn is_open(&self) -> bool {
        *self.open.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn close(&self) {
        *self.open.lock().unwrap_or_else(|e| e.into_inner()) = false;
    }
}

impl Default for DeliveryGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Disposer for a remote subscription.
///
/// Cancelling (or dropping) permanently stops delivery.
pub struct Subscription {
    gate: DeliveryGate,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Wraps a delivery gate and the background task feeding it.
    pub fn new(gate: DeliveryGate, task: JoinHandle<()>) -> Self {
        Self {
            gate,
            task: Some(task),
        }
    }

    /// Whether snapshots are still being delivered.
    pub fn is_active(&self) -> bool {
        self.gate.is_open()
    }

    /// Stops delivery and the background task.
    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.gate.close();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
