mod common;

use common::{blitz, create_device, create_test_environment, eventually, POLL};
use vigil_core::{
    params::{SetStatus, ToggleVehicle},
    persistence::{LocalCache, SqliteCache},
    OperationStatus, SyncStatus,
};

#[tokio::test]
async fn test_devices_share_sqlite_remote() {
    let (dir, remote) = create_test_environment();
    let device_a = create_device(&dir, "a", &remote).await;
    let device_b = create_device(&dir, "b", &remote).await;

    let plan = device_a.create(&blitz()).expect("Failed to create plan");
    device_a.wait_idle().await;
    assert_eq!(device_a.status(), SyncStatus::Idle);
    assert_eq!(device_a.last_sync_error(), None);

    eventually(|| device_b.plans().len() == 1).await;
    assert_eq!(device_b.plan(&plan.id).unwrap().name, "Blitz");

    device_b
        .toggle_vehicle(&ToggleVehicle {
            plan_id: plan.id.clone(),
            vehicle_id: "VT-1".to_string(),
        })
        .unwrap();
    device_b.wait_idle().await;

    eventually(|| {
        device_a
            .plan(&plan.id)
            .is_ok_and(|p| p.vehicle("VT-1").is_some_and(|v| v.arrived))
    })
    .await;

    device_a.shutdown().await.unwrap();
    device_b.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_restart_restores_from_cache() {
    let (dir, remote) = create_test_environment();
    let cache_path = dir.path().join("restart-cache.db");

    let device = create_device(&dir, "restart", &remote).await;
    let plan = device.create(&blitz()).unwrap();
    device
        .set_status(&SetStatus {
            id: plan.id.clone(),
            status: "in-progress".to_string(),
        })
        .unwrap();
    device.wait_idle().await;
    device.shutdown().await.unwrap();

    let cached = SqliteCache::new(&cache_path)
        .unwrap()
        .load()
        .unwrap()
        .expect("cache should hold a snapshot");
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].status, OperationStatus::InProgress);

    let restarted = create_device(&dir, "restart", &remote).await;
    assert_eq!(restarted.plans(), cached);
    restarted.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_new_device_adopts_remote_list() {
    let (dir, remote) = create_test_environment();
    let first = create_device(&dir, "first", &remote).await;
    first.create(&blitz()).unwrap();
    first.create(&blitz()).unwrap();
    first.wait_idle().await;

    let late = create_device(&dir, "late", &remote).await;
    assert_eq!(late.plans().len(), 2);
    assert!(late.is_subscribed());
    assert_eq!(late.remote_tag(), "sqlite");

    first.shutdown().await.unwrap();
    late.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rapid_mutations_keep_every_plan() {
    let (dir, remote) = create_test_environment();
    let device = create_device(&dir, "rapid", &remote).await;

    for _ in 0..5 {
        device.create(&blitz()).expect("Failed to create plan");
    }
    device.wait_idle().await;
    tokio::time::sleep(POLL * 5).await;

    assert_eq!(device.plans().len(), 5);
    device.shutdown().await.unwrap();
}
