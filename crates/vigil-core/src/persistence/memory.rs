//! In-memory cache and remote store for tests and demos.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard,
};

use async_trait::async_trait;
use log::debug;
use tokio::sync::broadcast::{self, error::RecvError};

use super::{
    decode_payload, encode_payload, DeliveryGate, LocalCache, RemotePayload, RemoteSnapshot,
    RemoteStore, SnapshotHandler, Subscription,
};
use crate::{
    error::{Result, SyncError, VigilError},
    models::OperationPlan,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Local cache holding the serialized snapshot in memory.
#[derive(Debug, Default)]
pub struct MemoryCache {
    slot: Mutex<Option<String>>,
    failing: AtomicBool,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `plans` already cached.
    pub fn with_plans(plans: &[OperationPlan]) -> Result<Self> {
        let cache = Self::new();
        cache.save(plans)?;
        Ok(cache)
    }

    /// Makes every subsequent load and save fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(VigilError::CacheUnavailable(
                "memory cache is failing".to_string(),
            ));
        }
        Ok(())
    }
}

impl LocalCache for MemoryCache {
    fn load(&self) -> Result<Option<Vec<OperationPlan>>> {
        self.check()?;
        match lock(&self.slot).as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, plans: &[OperationPlan]) -> Result<()> {
        self.check()?;
        *lock(&self.slot) = Some(serde_json::to_string(plans)?);
        Ok(())
    }
}

/// Stored payload and the revision it was written at.
#[derive(Debug, Default)]
struct Contents {
    revision: u64,
    payload: Option<RemotePayload>,
}

#[derive(Debug)]
struct RemoteInner {
    contents: Mutex<Contents>,
    changes: broadcast::Sender<()>,
    offline: AtomicBool,
}

/// Shared in-process store.
///
/// Clones share the same contents, so each clone behaves like another device
/// connected to one database.
#[derive(Debug, Clone)]
pub struct MemoryRemote {
    inner: Arc<RemoteInner>,
}

impl Default for MemoryRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRemote {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            inner: Arc::new(RemoteInner {
                contents: Mutex::default(),
                changes,
                offline: AtomicBool::new(false),
            }),
        }
    }

    /// Simulates losing connectivity; saves and subscribes fail while set.
    pub fn set_offline(&self, offline: bool) {
        self.inner.offline.store(offline, Ordering::SeqCst);
    }

    /// Current remote contents, or `None` if nothing was ever written.
    pub fn snapshot(&self) -> Option<Vec<OperationPlan>> {
        self.current().map(|snapshot| snapshot.plans)
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> u64 {
        lock(&self.inner.contents).revision
    }

    /// Replaces the contents as if another device had written them.
    ///
    /// Returns the new revision.
    pub fn publish(&self, plans: &[OperationPlan]) -> u64 {
        let revision = {
            let mut contents = lock(&self.inner.contents);
            contents.revision += 1;
            contents.payload = Some(encode_payload(plans));
            contents.revision
        };
        // No receivers is fine.
        let _ = self.inner.changes.send(());
        revision
    }

    fn current(&self) -> Option<RemoteSnapshot> {
        let contents = lock(&self.inner.contents);
        contents.payload.clone().map(|payload| RemoteSnapshot {
            revision: contents.revision,
            plans: decode_payload(payload),
        })
    }

    fn check_online(&self) -> std::result::Result<(), SyncError> {
        if self.inner.offline.load(Ordering::SeqCst) {
            return Err(SyncError::Unavailable("network offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MemoryRemote {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn save(&self, plans: &[OperationPlan]) -> std::result::Result<u64, SyncError> {
        self.check_online()?;
        let revision = self.publish(plans);
        debug!("Memory remote revision {revision} holds {} plans", plans.len());
        Ok(revision)
    }

    async fn subscribe(
        &self,
        handler: SnapshotHandler,
    ) -> std::result::Result<Subscription, SyncError> {
        self.check_online()?;

        let mut changes = self.inner.changes.subscribe();
        let gate = DeliveryGate::new();
        if let Some(snapshot) = self.current() {
            gate.deliver(&handler, snapshot);
        }

        let remote = self.clone();
        let task_gate = gate.clone();
        let task = tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(()) | Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                }
                let Some(snapshot) = remote.current() else {
                    continue;
                };
                if !task_gate.deliver(&handler, snapshot) {
                    break;
                }
            }
        });

        Ok(Subscription::new(gate, task))
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::atomic::AtomicUsize, time::Duration};

    use super::*;
    use crate::{models::PlanDraft, store};

    fn plan(name: &str) -> OperationPlan {
        store::create_plan(&PlanDraft {
            name: name.to_string(),
            vehicles_count: 1,
            ..Default::default()
        })
    }

    #[test]
    fn test_memory_cache_failure_injection() {
        let cache = MemoryCache::new();
        assert_eq!(cache.load().unwrap(), None);

        cache.save(&[plan("a")]).unwrap();
        cache.set_failing(true);
        assert!(matches!(cache.load(), Err(VigilError::CacheUnavailable(_))));
        assert!(cache.save(&[]).is_err());

        cache.set_failing(false);
        assert_eq!(cache.load().unwrap().map(|p| p.len()), Some(1));
    }

    #[tokio::test]
    async fn test_clones_share_contents() {
        let device_a = MemoryRemote::new();
        let device_b = device_a.clone();

        assert_eq!(device_a.save(&[plan("a")]).await.unwrap(), 1);
        assert_eq!(device_b.snapshot().map(|p| p.len()), Some(1));
        assert_eq!(device_b.write_count(), 1);
        assert_eq!(device_b.save(&[]).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_offline_rejects_writes() {
        let remote = MemoryRemote::new();
        remote.set_offline(true);
        assert!(matches!(
            remote.save(&[plan("a")]).await,
            Err(SyncError::Unavailable(_))
        ));
        assert!(remote.snapshot().is_none());
        assert_eq!(remote.write_count(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_subscription_stops_delivery() {
        let remote = MemoryRemote::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let subscription = remote
            .subscribe(Arc::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }))
            .await
            .unwrap();

        remote.save(&[plan("a")]).await.unwrap();
        for _ in 0..50 {
            if seen.load(Ordering::SeqCst) == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert!(subscription.is_active());

        subscription.cancel();
        remote.save(&[plan("b")]).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
