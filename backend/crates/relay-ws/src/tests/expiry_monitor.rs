use super::{drain_events, relay};
use crate::{ExpiryConfig, ExpiryMonitor, ShutdownCoordinator};

use relay_config::FreshnessConfig;
use relay_core::RelayEvent;

use axum::extract::ws::Message;
use googletest::assert_that;
use googletest::prelude::eq;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};

fn fast_config() -> ExpiryConfig {
    ExpiryConfig {
        stale_after: Duration::from_millis(50),
        sweep_interval: Duration::from_millis(10),
    }
}

#[test]
fn given_freshness_config_when_converted_then_durations_match() {
    let config = ExpiryConfig::from(&FreshnessConfig::default());

    assert_that!(config.stale_after, eq(Duration::from_secs(30)));
    assert_that!(config.sweep_interval, eq(Duration::from_secs(5)));
}

#[tokio::test]
async fn given_stale_snapshot_when_swept_then_cleared() {
    let relay = relay();
    relay.ingest_at(json!({"x": 1}), 0).await.unwrap();
    let monitor = ExpiryMonitor::new(relay.clone(), ExpiryConfig::default());

    assert!(monitor.sweep_at(30_001).await);
    assert!(!relay.store().has_snapshot().await);
}

#[tokio::test]
async fn given_fresh_snapshot_when_swept_then_kept() {
    let relay = relay();
    relay.ingest_at(json!({"x": 1}), 0).await.unwrap();
    let monitor = ExpiryMonitor::new(relay.clone(), ExpiryConfig::default());

    assert!(!monitor.sweep_at(30_000).await);
    assert!(relay.store().has_snapshot().await);
}

#[tokio::test]
async fn given_empty_store_when_swept_then_noop() {
    let monitor = ExpiryMonitor::new(relay(), ExpiryConfig::default());

    assert!(!monitor.sweep().await);
}

#[tokio::test]
async fn given_running_monitor_when_snapshot_ages_then_subscriber_invalidated_once() {
    let relay = relay();
    let (tx, mut rx) = mpsc::channel::<Message>(100);
    relay.on_connect("a".into(), tx).await.unwrap();
    drain_events(&mut rx);
    relay.ingest(json!({"x": 1})).await.unwrap();
    drain_events(&mut rx);

    let coordinator = ShutdownCoordinator::new();
    let handle = ExpiryMonitor::new(relay.clone(), fast_config()).spawn(coordinator.subscribe_guard());

    let received = timeout(Duration::from_secs(2), rx.recv()).await;
    assert!(matches!(received, Ok(Some(Message::Text(_)))));
    assert!(!relay.store().has_snapshot().await);

    // Several more sweeps with an empty store
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(drain_events(&mut rx).is_empty());

    coordinator.shutdown();
    assert!(timeout(Duration::from_secs(1), handle).await.is_ok());
}

#[tokio::test]
async fn given_running_monitor_when_snapshot_expires_then_event_is_invalidated() {
    let relay = relay();
    let (tx, mut rx) = mpsc::channel::<Message>(100);
    relay.ingest(json!({"x": 1})).await.unwrap();
    relay.on_connect("a".into(), tx).await.unwrap();
    drain_events(&mut rx);

    let coordinator = ShutdownCoordinator::new();
    let handle = ExpiryMonitor::new(relay.clone(), fast_config()).spawn(coordinator.subscribe_guard());

    let Ok(Some(Message::Text(text))) = timeout(Duration::from_secs(2), rx.recv()).await else {
        panic!("expected an invalidated frame");
    };
    let event: RelayEvent = serde_json::from_str(text.as_str()).unwrap();
    assert_eq!(event, RelayEvent::Invalidated);

    coordinator.shutdown();
    handle.await.unwrap();
}

#[tokio::test]
async fn given_shutdown_before_spawn_when_monitor_started_then_exits_promptly() {
    let coordinator = ShutdownCoordinator::new();
    coordinator.shutdown();

    let handle = ExpiryMonitor::new(relay(), ExpiryConfig::default()).spawn(coordinator.subscribe_guard());

    assert!(timeout(Duration::from_secs(1), handle).await.is_ok());
}
