//! Status and change events published by the sync controller.

use serde::Serialize;

/// Whether remote writes are outstanding.
///
/// Advisory only: mutations are accepted in either state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum SyncStatus {
    #[default]
    Idle,
    Syncing,
}

impl SyncStatus {
    pub(crate) fn from_pending(pending: usize) -> Self {
        if pending == 0 {
            SyncStatus::Idle
        } else {
            SyncStatus::Syncing
        }
    }

    pub fn is_syncing(&self) -> bool {
        matches!(self, SyncStatus::Syncing)
    }
}

/// Where a list change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChangeOrigin {
    /// A mutation issued on this device
    Local,
    /// A snapshot delivered by the remote subscription
    Remote,
}

/// Component a notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NoticeSource {
    LocalCache,
    Remote,
}

/// Non-fatal failure surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub source: NoticeSource,
    pub message: String,
}

impl Notice {
    pub fn cache(message: impl Into<String>) -> Self {
        Self {
            source: NoticeSource::LocalCache,
            message: message.into(),
        }
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self {
            source: NoticeSource::Remote,
            message: message.into(),
        }
    }
}

/// Everything the controller broadcasts to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SyncEvent {
    PlansChanged { origin: ChangeOrigin },
    StatusChanged(SyncStatus),
    Notice(Notice),
}

/// Pending-write bookkeeping carried in the controller's watch channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncState {
    pub pending: usize,
    pub last_error: Option<String>,
}

impl SyncState {
    pub fn status(&self) -> SyncStatus {
        SyncStatus::from_pending(self.pending)
    }
}
