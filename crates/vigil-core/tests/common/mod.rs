#![allow(dead_code)]

use std::{path::PathBuf, time::Duration};

use tempfile::TempDir;
use vigil_core::{params::CreatePlan, SyncController, SyncControllerBuilder};

pub const POLL: Duration = Duration::from_millis(20);

/// Temporary directory holding a shared remote database.
pub fn create_test_environment() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let remote_path = temp_dir.path().join("remote.db");
    (temp_dir, remote_path)
}

/// Builds a SQLite-backed controller acting as device `name`.
pub async fn create_device(dir: &TempDir, name: &str, remote: &PathBuf) -> SyncController {
    SyncControllerBuilder::new()
        .with_cache_path(Some(dir.path().join(format!("{name}-cache.db"))))
        .with_remote_path(Some(remote))
        .with_poll_interval(POLL)
        .build()
        .await
}

pub fn blitz() -> CreatePlan {
    CreatePlan {
        name: "Blitz".to_string(),
        location: "Praça Sete".to_string(),
        date: "2024-09-01".to_string(),
        start_time: "16:00".to_string(),
        agents_count: "10".to_string(),
        vehicles_count: "2".to_string(),
        ..Default::default()
    }
}

/// Polls until `check` holds, failing the test after two seconds.
pub async fn eventually<F: Fn() -> bool>(check: F) {
    for _ in 0..200 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}
