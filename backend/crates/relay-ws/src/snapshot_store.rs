use relay_core::Snapshot;

use std::sync::Arc;

use log::debug;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

/// Single-slot holder for the latest snapshot; last write wins
#[derive(Clone, Default)]
pub struct SnapshotStore {
    slot: Arc<RwLock<Option<Snapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `payload` received now, replacing whatever was held
    pub async fn set(&self, payload: Map<String, Value>) -> Snapshot {
        let snapshot = Snapshot::new(payload, relay_core::now_millis());
        self.replace(snapshot.clone()).await;
        snapshot
    }

    /// Store a fully built snapshot, returning the one it replaced
    pub async fn replace(&self, snapshot: Snapshot) -> Option<Snapshot> {
        let mut slot = self.slot.write().await;
        slot.replace(snapshot)
    }

    pub async fn get(&self) -> Option<Snapshot> {
        self.slot.read().await.clone()
    }

    pub async fn has_snapshot(&self) -> bool {
        self.slot.read().await.is_some()
    }

    /// Empty the slot; returns false if it was already empty
    pub async fn clear(&self) -> bool {
        self.slot.write().await.take().is_some()
    }

    pub async fn is_stale(&self, now: i64, threshold_ms: u64) -> bool {
        self.slot
            .read()
            .await
            .as_ref()
            .is_some_and(|snapshot| snapshot.is_older_than(now, threshold_ms))
    }

    /// Check and clear under one lock so a fresher snapshot is never discarded
    pub async fn clear_if_stale(&self, now: i64, threshold_ms: u64) -> Option<Snapshot> {
        let mut slot = self.slot.write().await;
        let stale = slot
            .as_ref()
            .is_some_and(|snapshot| snapshot.is_older_than(now, threshold_ms));

        if stale {
            let expired = slot.take();
            if let Some(ref snapshot) = expired {
                debug!("Cleared snapshot aged {}ms", snapshot.age_ms(now));
            }
            expired
        } else {
            None
        }
    }
}
