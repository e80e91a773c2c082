//! Sync controller owning the authoritative plan list.
//!
//! The [`SyncController`] sits between a presentation layer and the two
//! persistence seams. It keeps the in-memory list, applies plan store
//! transitions optimistically, mirrors every change into the local cache and
//! pushes full snapshots to the remote store through a serialized writer.
//!
//! ```text
//! mutation ──▶ in-memory list ──▶ LocalCache::save
//!                    │
//!                    └──▶ writer queue ──▶ RemoteStore::save
//!                                               │
//! in-memory list ◀── remote subscription ◀──────┘
//! ```
//!
//! Remote snapshots replace the list wholesale. Concurrent edits from several
//! devices resolve as last writer wins over the whole list. While this
//! device still has writes queued, incoming snapshots are held back: the
//! queued writes will replace them on the remote, and applying an echo of an
//! earlier write would roll back later local changes. Snapshots older than
//! this device's last completed write are dropped.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use vigil_core::{
//!     params::{CreatePlan, ToggleVehicle},
//!     persistence::{MemoryCache, MemoryRemote},
//!     sync::SyncControllerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = SyncControllerBuilder::new()
//!     .with_local_cache(Arc::new(MemoryCache::new()))
//!     .with_remote(Arc::new(MemoryRemote::new()))
//!     .build()
//!     .await;
//!
//! let plan = controller.create(&CreatePlan {
//!     name: "Blitz".to_string(),
//!     location: "Praça Sete".to_string(),
//!     date: "2024-09-01".to_string(),
//!     start_time: "16:00".to_string(),
//!     ..Default::default()
//! })?;
//! controller.toggle_vehicle(&ToggleVehicle {
//!     plan_id: plan.id.clone(),
//!     vehicle_id: "VT-1".to_string(),
//! })?;
//!
//! controller.wait_idle().await;
//! controller.shutdown().await?;
//! # Ok(())
//! # }
//! ```

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use log::{debug, info, warn};
use tokio::{
    sync::{broadcast, mpsc, watch},
    task::{self, JoinHandle},
};

use crate::{
    error::{Result, SyncError, VigilError},
    export,
    models::{OperationPlan, OperationSummary},
    params::{CreatePlan, DeletePlan, SetStatus, ToggleVehicle, UpdatePlan},
    persistence::{LocalCache, RemoteSnapshot, RemoteStore, SnapshotHandler, Subscription},
    store,
};

mod builder;
mod events;
mod writer;


pub use builder::SyncControllerBuilder;
pub use events::{ChangeOrigin, Notice, NoticeSource, SyncEvent, SyncState, SyncStatus};

/// Capacity of the event broadcast; slow observers see `Lagged`.
const EVENT_CAPACITY: usize = 256;

/// The plan list and the remote bookkeeping that changes with it.
struct ListState {
    plans: Vec<OperationPlan>,
    /// Revision produced by this device's latest successful remote write
    written_revision: u64,
    /// Newest snapshot received while local writes were queued
    held: Option<RemoteSnapshot>,
}

/// State shared with the writer task and the remote inbox.
pub(crate) struct Shared {
    list: Mutex<ListState>,
    local: Arc<dyn LocalCache>,
    state: watch::Sender<SyncState>,
    events: broadcast::Sender<SyncEvent>,
}

impl Shared {
    fn list(&self) -> MutexGuard<'_, ListState> {
        self.list.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn emit(&self, event: SyncEvent) {
        // Nobody listening is fine.
        let _ = self.events.send(event);
    }

    /// Mirrors a snapshot into the local cache, reporting failures.
    fn persist_local(&self, plans: &[OperationPlan]) {
        if let Err(e) = self.local.save(plans) {
            warn!("Failed to write local cache: {e}");
            self.emit(SyncEvent::Notice(Notice::cache(format!(
                "Could not save to this device: {e}"
            ))));
        }
    }

    /// Handles one snapshot from the remote subscription.
    ///
    /// Runs on the blocking pool.
    fn receive_remote(&self, snapshot: RemoteSnapshot) {
        let mut list = self.list();
        if snapshot.revision < list.written_revision {
            debug!(
                "Dropping remote revision {}, older than own write {}",
                snapshot.revision, list.written_revision
            );
            return;
        }
        if self.state.borrow().pending > 0 {
            debug!(
                "Holding remote revision {} until queued writes finish",
                snapshot.revision
            );
            list.held = Some(snapshot);
            return;
        }

        self.replace_list(&mut list, snapshot);
        drop(list);
        self.emit(SyncEvent::PlansChanged {
            origin: ChangeOrigin::Remote,
        });
    }

    fn replace_list(&self, list: &mut ListState, snapshot: RemoteSnapshot) {
        debug!(
            "Remote revision {} with {} plans applied",
            snapshot.revision,
            snapshot.plans.len()
        );
        self.persist_local(&snapshot.plans);
        list.plans = snapshot.plans;
    }

    /// Records a finished remote write and settles held snapshots.
    ///
    /// `written` is the revision on success; `error` the failure message.
    /// When the queue drains, a held snapshot newer than the last write is
    /// applied. Runs on the blocking pool.
    fn finish_write(&self, written: Option<u64>, error: Option<String>) -> WriteSettled {
        let mut list = self.list();
        if let Some(revision) = written {
            list.written_revision = list.written_revision.max(revision);
        }

        let mut idle = false;
        self.state.send_modify(|state| {
            state.pending = state.pending.saturating_sub(1);
            state.last_error = error;
            idle = state.pending == 0;
        });

        let mut replaced = false;
        if idle {
            if let Some(held) = list.held.take() {
                if held.revision > list.written_revision {
                    self.replace_list(&mut list, held);
                    replaced = true;
                }
            }
        }
        WriteSettled { idle, replaced }
    }
}

/// What a finished remote write changed.
#[derive(Debug, Clone, Copy)]
struct WriteSettled {
    idle: bool,
    replaced: bool,
}

/// Applies delivered snapshots in order, off the async workers.
fn spawn_inbox(
    shared: Arc<Shared>,
    mut inbox: mpsc::UnboundedReceiver<RemoteSnapshot>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(snapshot) = inbox.recv().await {
            receive_off_thread(&shared, snapshot).await;
        }
        debug!("Remote inbox closed");
    })
}

async fn receive_off_thread(shared: &Arc<Shared>, snapshot: RemoteSnapshot) {
    let shared = shared.clone();
    if let Err(e) = task::spawn_blocking(move || shared.receive_remote(snapshot)).await {
        warn!("Failed to apply remote snapshot: {e}");
    }
}

/// Owner of the in-memory plan list and its synchronization.
///
/// Mutations are synchronous: they return once the list, the local cache
/// and the writer queue are updated. Remote writes complete in the
/// background; use [`SyncController::status`] or
/// [`SyncController::wait_idle`] to observe them.
pub struct SyncController {
    shared: Arc<Shared>,
    queue: writer::SnapshotQueue,
    writer: JoinHandle<()>,
    inbox: JoinHandle<()>,
    subscription: Option<Subscription>,
    remote_tag: &'static str,
    startup_notices: Vec<Notice>,
}

impl SyncController {
    /// Loads the initial list, starts the writer and subscribes to the remote.
    ///
    /// Cache and subscription failures do not abort startup; they are logged
    /// and kept in [`SyncController::startup_notices`].
    pub(crate) async fn start(
        local: Arc<dyn LocalCache>,
        remote: Arc<dyn RemoteStore>,
        seed: Vec<OperationPlan>,
    ) -> Self {
        let mut startup_notices = Vec::new();

        let initial = match local.load() {
            Ok(Some(plans)) => {
                debug!("Loaded {} plans from local cache", plans.len());
                plans
            }
            Ok(None) => {
                info!("Local cache is empty; starting with {} plans", seed.len());
                if let Err(e) = local.save(&seed) {
                    warn!("Failed to write local cache: {e}");
                    startup_notices.push(Notice::cache(format!(
                        "Could not save to this device: {e}"
                    )));
                }
                seed
            }
            Err(e) => {
                warn!("Failed to read local cache: {e}");
                startup_notices.push(Notice::cache(format!(
                    "Could not read saved plans from this device: {e}"
                )));
                seed
            }
        };

        let (state, _) = watch::channel(SyncState::default());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let shared = Arc::new(Shared {
            list: Mutex::new(ListState {
                plans: initial,
                written_revision: 0,
                held: None,
            }),
            local,
            state,
            events,
        });

        let (queue, writer) = writer::spawn_writer(remote.clone(), shared.clone());

        let (inbox_tx, mut inbox_rx) = mpsc::unbounded_channel::<RemoteSnapshot>();
        let handler: SnapshotHandler = Arc::new(move |snapshot| {
            // Fails only once the controller has shut down.
            let _ = inbox_tx.send(snapshot);
        });
        let subscription = match remote.subscribe(handler).await {
            Ok(subscription) => {
                info!("Subscribed to {} remote", remote.backend_tag());
                Some(subscription)
            }
            Err(e) => {
                warn!("Remote subscription failed, continuing locally: {e}");
                startup_notices.push(Notice::remote(format!(
                    "Working offline; changes will not arrive from other devices: {e}"
                )));
                None
            }
        };

        // The initial snapshot arrives during `subscribe`; apply it before returning.
        while let Ok(snapshot) = inbox_rx.try_recv() {
            receive_off_thread(&shared, snapshot).await;
        }
        let inbox = spawn_inbox(shared.clone(), inbox_rx);

        Self {
            shared,
            queue,
            writer,
            inbox,
            subscription,
            remote_tag: remote.backend_tag(),
            startup_notices,
        }
    }

    /// Applies `change` to a copy of the list and commits it.
    ///
    /// On error the list is left untouched and nothing is persisted. Any held
    /// remote snapshot is discarded.
    fn mutate<T, F>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<OperationPlan>) -> Result<T>,
    {
        let mut list = self.shared.list();
        let mut next = list.plans.clone();
        let output = change(&mut next)?;

        list.plans = next.clone();
        list.held = None;
        self.shared.persist_local(&next);
        self.shared.emit(SyncEvent::PlansChanged {
            origin: ChangeOrigin::Local,
        });
        self.enqueue(next);
        Ok(output)
    }

    /// Hands a snapshot to the writer and marks the controller as syncing.
    ///
    /// Called with the list lock held so the pending count moves with it.
    fn enqueue(&self, snapshot: Vec<OperationPlan>) {
        let mut started = false;
        self.shared.state.send_modify(|state| {
            started = state.pending == 0;
            state.pending += 1;
        });
        if started {
            self.shared
                .emit(SyncEvent::StatusChanged(SyncStatus::Syncing));
        }

        if self.queue.send(snapshot).is_err() {
            warn!("Remote writer is gone; change kept locally only");
            self.shared.state.send_modify(|state| {
                state.pending = state.pending.saturating_sub(1);
                state.last_error = Some("remote writer stopped".to_string());
            });
            self.shared.emit(SyncEvent::StatusChanged(SyncStatus::Idle));
        }
    }

    /// Creates a plan and lists it first.
    pub fn create(&self, params: &CreatePlan) -> Result<OperationPlan> {
        let draft = params.validate()?;
        let plan = self.mutate(|plans| {
            let plan = store::create_plan(&draft);
            store::insert_plan(plans, plan.clone());
            Ok(plan)
        })?;
        info!("Created plan {} ({})", plan.id, plan.name);
        Ok(plan)
    }

    /// Permanently removes exactly one plan.
    ///
    /// # Errors
    ///
    /// * `VigilError::InvalidInput` - When the deletion was not confirmed
    /// * `VigilError::PlanNotFound` - When no plan has the given ID
    pub fn delete(&self, params: &DeletePlan) -> Result<OperationPlan> {
        if !params.confirmed {
            return Err(VigilError::invalid_input("confirmed")
                .with_reason("Deleting a plan must be explicitly confirmed"));
        }
        let removed = self.mutate(|plans| store::remove_plan(plans, &params.id))?;
        info!("Deleted plan {}", removed.id);
        Ok(removed)
    }

    /// Merges edited descriptive fields into a plan.
    pub fn update_fields(&self, params: &UpdatePlan) -> Result<OperationPlan> {
        let patch = params.validate()?;
        let plan = self.mutate(|plans| {
            store::replace_plan(plans, &params.id, |plan| Ok(store::update_fields(plan, &patch)))
        })?;
        debug!(
            "Updated plan {} fields: {}",
            plan.id,
            patch.changed_fields().join(", ")
        );
        Ok(plan)
    }

    /// Moves a plan forward in its lifecycle.
    pub fn set_status(&self, params: &SetStatus) -> Result<OperationPlan> {
        let status = params.validate()?;
        let plan = self.mutate(|plans| {
            store::replace_plan(plans, &params.id, |plan| store::set_status(plan, status))
        })?;
        info!("Plan {} is now {}", plan.id, plan.status.label());
        Ok(plan)
    }

    /// Flips a vehicle's check-in flag.
    pub fn toggle_vehicle(&self, params: &ToggleVehicle) -> Result<OperationPlan> {
        self.mutate(|plans| {
            store::replace_plan(plans, &params.plan_id, |plan| {
                store::toggle_vehicle(plan, &params.vehicle_id)
            })
        })
    }

    /// Current list snapshot.
    pub fn plans(&self) -> Vec<OperationPlan> {
        self.shared.list().plans.clone()
    }

    /// Looks up a single plan.
    pub fn plan(&self, id: &str) -> Result<OperationPlan> {
        self.shared
            .list()
            .plans
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| VigilError::plan_not_found(id))
    }

    /// Totals over the current list.
    pub fn summary(&self) -> OperationSummary {
        OperationSummary::from(self.shared.list().plans.as_slice())
    }

    /// Whether remote writes are outstanding.
    pub fn status(&self) -> SyncStatus {
        self.shared.state.borrow().status()
    }

    /// Message of the most recent failed remote write, cleared by the next
    /// successful one.
    pub fn last_sync_error(&self) -> Option<String> {
        self.shared.state.borrow().last_error.clone()
    }

    /// Waits until every queued remote write has completed.
    pub async fn wait_idle(&self) {
        let mut state = self.shared.state.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = state.wait_for(|s| s.pending == 0).await;
    }

    /// Receives every event published after this call.
    pub fn subscribe_events(&self) -> broadcast::Receiver<SyncEvent> {
        self.shared.events.subscribe()
    }

    /// Failures met while starting up.
    pub fn startup_notices(&self) -> &[Notice] {
        &self.startup_notices
    }

    /// Whether the remote subscription is delivering snapshots.
    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    pub fn remote_tag(&self) -> &'static str {
        self.remote_tag
    }

    /// Writes the current list as a pretty JSON backup file.
    pub fn export_backup(&self, path: &Path) -> Result<PathBuf> {
        let plans = self.plans();
        export::export_backup(&plans, path)
    }

    /// Stops the subscription and waits for queued writes to settle.
    pub async fn shutdown(self) -> Result<()> {
        let SyncController {
            queue,
            writer,
            inbox,
            subscription,
            ..
        } = self;

        if let Some(subscription) = subscription {
            subscription.cancel();
        }
        inbox.abort();
        drop(queue);
        writer
            .await
            .map_err(|e| VigilError::Sync(SyncError::Task(e.to_string())))?;
        debug!("Sync controller shut down");
        Ok(())
    }
}
