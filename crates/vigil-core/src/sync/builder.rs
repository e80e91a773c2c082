//! Builder for creating and configuring sync controllers.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use log::warn;
use tokio::task;

use super::SyncController;
use crate::{
    error::{Result, VigilError},
    models::OperationPlan,
    persistence::{
        LocalCache, OfflineRemote, RemoteStore, SqliteCache, SqliteRemote, UnavailableCache,
        DEFAULT_POLL_INTERVAL,
    },
};

const XDG_PREFIX: &str = "vigil";
const CACHE_FILE: &str = "cache.db";
const REMOTE_FILE: &str = "remote.db";

/// Builder for [`SyncController`] instances.
///
/// By default both stores are SQLite files under the XDG data directory:
/// `$XDG_DATA_HOME/vigil/cache.db` for this device's cache and
/// `$XDG_DATA_HOME/vigil/remote.db` for the shared store. Point
/// [`with_remote_path`](Self::with_remote_path) at a shared location to
/// synchronize several machines, or inject custom stores.
pub struct SyncControllerBuilder {
    cache_path: Option<PathBuf>,
    remote_path: Option<PathBuf>,
    local: Option<Arc<dyn LocalCache>>,
    remote: Option<Arc<dyn RemoteStore>>,
    seed: Vec<OperationPlan>,
    poll_interval: Duration,
}

impl SyncControllerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            cache_path: None,
            remote_path: None,
            local: None,
            remote: None,
            seed: Vec::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the local cache database file.
    pub fn with_cache_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.cache_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the shared remote database file.
    pub fn with_remote_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.remote_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses a custom local cache instead of the SQLite file.
    pub fn with_local_cache(mut self, cache: Arc<dyn LocalCache>) -> Self {
        self.local = Some(cache);
        self
    }

    /// Uses a custom remote store instead of the SQLite file.
    pub fn with_remote(mut self, remote: Arc<dyn RemoteStore>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Plans to start with when the local cache has never been written.
    pub fn with_seed(mut self, seed: Vec<OperationPlan>) -> Self {
        self.seed = seed;
        self
    }

    /// How often the SQLite remote is checked for changes.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Builds the controller, loading the initial list.
    ///
    /// A store that cannot be opened does not fail the build. An unopenable
    /// cache is replaced by [`UnavailableCache`] and an unreachable remote
    /// by [`OfflineRemote`]; the controller then runs on its in-memory list
    /// and reports the failure in [`SyncController::startup_notices`].
    pub async fn build(self) -> SyncController {
        let local: Arc<dyn LocalCache> = match self.local {
            Some(local) => local,
            None => match open_cache(self.cache_path).await {
                Ok(cache) => Arc::new(cache),
                Err(e) => {
                    warn!("Local cache could not be opened, keeping plans in memory: {e}");
                    Arc::new(UnavailableCache::new(e.to_string()))
                }
            },
        };

        let remote: Arc<dyn RemoteStore> = match self.remote {
            Some(remote) => remote,
            None => match open_remote(self.remote_path).await {
                Ok(remote) => Arc::new(remote.with_poll_interval(self.poll_interval)),
                Err(e) => {
                    warn!("Remote store could not be opened, working offline: {e}");
                    Arc::new(OfflineRemote::new(e.to_string()))
                }
            },
        };

        SyncController::start(local, remote, self.seed).await
    }
}

async fn open_cache(configured: Option<PathBuf>) -> Result<SqliteCache> {
    let path = resolve_path(configured, CACHE_FILE)?;
    open_blocking(move || SqliteCache::new(path)).await
}

async fn open_remote(configured: Option<PathBuf>) -> Result<SqliteRemote> {
    let path = resolve_path(configured, REMOTE_FILE)?;
    open_blocking(move || SqliteRemote::new(path)).await
}

impl Default for SyncControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Uses the configured path or the XDG default, creating parent directories.
fn resolve_path(configured: Option<PathBuf>, file_name: &str) -> Result<PathBuf> {
    let path = match configured {
        Some(path) => path,
        None => default_data_path(file_name)?,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| VigilError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }
    Ok(path)
}

/// Returns a data file path following the XDG Base Directory specification.
fn default_data_path(file_name: &str) -> Result<PathBuf> {
    xdg::BaseDirectories::with_prefix(XDG_PREFIX)
        .place_data_file(file_name)
        .map_err(|e| VigilError::XdgDirectory(e.to_string()))
}

/// Opens a SQLite-backed store off the async runtime.
async fn open_blocking<T, F>(open: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    task::spawn_blocking(open)
        .await
        .map_err(|e| VigilError::Configuration {
            message: format!("Task join error: {e}"),
        })?
}
