//! Serialized remote writer.
//!
//! A single task drains the snapshot queue so writes issued by this device
//! reach the remote store in the order they were made.

use std::sync::Arc;

use log::{debug, warn};
use tokio::{
    sync::mpsc,
    task::{self, JoinHandle},
};

use super::{ChangeOrigin, Notice, Shared, SyncEvent, SyncStatus};
use crate::{models::OperationPlan, persistence::RemoteStore};

pub(super) type SnapshotQueue = mpsc::UnboundedSender<Vec<OperationPlan>>;

/// Spawns the writer and returns the queue feeding it.
///
/// The task exits once every sender is dropped and the queue is drained.
pub(super) fn spawn_writer(
    remote: Arc<dyn RemoteStore>,
    shared: Arc<Shared>,
) -> (SnapshotQueue, JoinHandle<()>) {
    let (queue, mut snapshots) = mpsc::unbounded_channel::<Vec<OperationPlan>>();

    let task = tokio::spawn(async move {
        while let Some(snapshot) = snapshots.recv().await {
            let (written, error) = match remote.save(&snapshot).await {
                Ok(revision) => {
                    debug!(
                        "Wrote {} plans to {} remote at revision {revision}",
                        snapshot.len(),
                        remote.backend_tag()
                    );
                    (Some(revision), None)
                }
                Err(e) => {
                    warn!("Remote write to {} failed: {e}", remote.backend_tag());
                    shared.emit(SyncEvent::Notice(Notice::remote(format!(
                        "Changes saved on this device but not synchronized: {e}"
                    ))));
                    (None, Some(e.to_string()))
                }
            };

            let task_shared = shared.clone();
            let settled =
                match task::spawn_blocking(move || task_shared.finish_write(written, error)).await {
                    Ok(settled) => settled,
                    Err(e) => {
                        warn!("Failed to record remote write: {e}");
                        continue;
                    }
                };

            if settled.replaced {
                shared.emit(SyncEvent::PlansChanged {
                    origin: ChangeOrigin::Remote,
                });
            }
            if settled.idle {
                shared.emit(SyncEvent::StatusChanged(SyncStatus::Idle));
            }
        }
        debug!("Remote writer stopped");
    });

    (queue, task)
}
