//! Stores used when the configured cache or remote cannot be opened.
//!
//! Both keep reporting the open failure, so the controller runs on its
//! in-memory list and surfaces every failed write as a notice.

use async_trait::async_trait;

use super::{LocalCache, RemoteStore, SnapshotHandler, Subscription};
use crate::{
    error::{Result, SyncError, VigilError},
    models::OperationPlan,
};

/// Local cache whose every load and save fails with the open error.
#[derive(Debug, Clone)]
pub struct UnavailableCache {
    reason: String,
}

impl UnavailableCache {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl LocalCache for UnavailableCache {
    fn load(&self) -> Result<Option<Vec<OperationPlan>>> {
        Err(VigilError::CacheUnavailable(self.reason.clone()))
    }

    fn save(&self, _plans: &[OperationPlan]) -> Result<()> {
        Err(VigilError::CacheUnavailable(self.reason.clone()))
    }
}

/// Remote store that was never reached.
#[derive(Debug, Clone)]
pub struct OfflineRemote {
    reason: String,
}

impl OfflineRemote {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl RemoteStore for OfflineRemote {
    fn backend_tag(&self) -> &'static str {
        "offline"
    }

    async fn save(&self, _plans: &[OperationPlan]) -> std::result::Result<u64, SyncError> {
        Err(SyncError::Unavailable(self.reason.clone()))
    }

    async fn subscribe(
        &self,
        _handler: SnapshotHandler,
    ) -> std::result::Result<Subscription, SyncError> {
        Err(SyncError::Unavailable(self.reason.clone()))
    }
}
