use crate::{
    BroadcastMessage, ConnectionId, ConnectionRegistry, Delivery, FanoutReport, Metrics,
    MetricsTimer, RelayStatus, Result as WsErrorResult, SnapshotStore, WsError,
};

use relay_core::{RelayEvent, Snapshot};

use std::sync::Arc;

use axum::extract::ws::Message;
use log::{debug, info, warn};
use serde_json::Value;
use tokio::sync::{Mutex, mpsc};

/// Ties the snapshot store to the set of subscribers.
///
/// Ingest, connect and expiry run one at a time, so subscribers observe
/// updates in ingest order and a catch-up `update` is never overtaken.
pub struct BroadcastRelay {
    store: SnapshotStore,
    registry: ConnectionRegistry,
    metrics: Metrics,
    sequencer: Arc<Mutex<()>>,
}

impl BroadcastRelay {
    pub fn new(registry: ConnectionRegistry, metrics: Metrics) -> Self {
        Self {
            store: SnapshotStore::new(),
            registry,
            metrics,
            sequencer: Arc::new(Mutex::new(())),
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Accept a producer payload received now. Returns the number of subscribers it was sent to.
    pub async fn ingest(&self, payload: Value) -> WsErrorResult<usize> {
        self.ingest_at(payload, relay_core::now_millis()).await
    }

    /// Accept a producer payload with an explicit receipt time
    pub async fn ingest_at(&self, payload: Value, received_at: i64) -> WsErrorResult<usize> {
        let snapshot = Snapshot::from_value(payload, received_at).map_err(|e| self.reject(e))?;
        self.publish(snapshot).await
    }

    /// Parse a raw request body and ingest it
    pub async fn ingest_bytes(&self, body: &[u8]) -> WsErrorResult<usize> {
        let snapshot =
            Snapshot::from_slice(body, relay_core::now_millis()).map_err(|e| self.reject(e))?;
        self.publish(snapshot).await
    }

    async fn publish(&self, snapshot: Snapshot) -> WsErrorResult<usize> {
        let _turn = self.sequencer.lock().await;

        self.store.replace(snapshot.clone()).await;
        let report = self.fan_out(&RelayEvent::update(snapshot)).await?;
        let clients = report.attempted();

        self.metrics.snapshot_ingested(clients);
        debug!("Snapshot ingested, broadcast to {clients} clients");

        Ok(clients)
    }

    #[track_caller]
    fn reject(&self, error: relay_core::CoreError) -> WsError {
        self.metrics.error_occurred("malformed_payload");
        let error = WsError::from(error);
        warn!("Rejected snapshot: {error}");
        error
    }

    /// Register a subscriber, send it the held snapshot (if any) and then its status
    pub async fn on_connect(
        &self,
        origin: String,
        sender: mpsc::Sender<Message>,
    ) -> WsErrorResult<ConnectionId> {
        let _turn = self.sequencer.lock().await;

        let connection_id = self.registry.register(origin, sender).await.inspect_err(|_| {
            self.metrics.connection_rejected();
        })?;

        if let Err(e) = self.greet(connection_id).await {
            self.registry.unregister(connection_id).await;
            return Err(e);
        }

        Ok(connection_id)
    }

    async fn greet(&self, connection_id: ConnectionId) -> WsErrorResult<()> {
        if let Some(snapshot) = self.store.get().await {
            self.send_one(connection_id, &RelayEvent::update(snapshot))
                .await?;
        }

        let status = RelayEvent::status(connection_id.as_uuid(), relay_core::now_millis());
        self.send_one(connection_id, &status).await?;

        Ok(())
    }

    /// Forget a subscriber. Safe to call more than once.
    pub async fn on_disconnect(&self, connection_id: ConnectionId) -> bool {
        self.registry.unregister(connection_id).await
    }

    /// Answer a liveness probe to the probing subscriber only
    pub async fn on_heartbeat_probe(&self, connection_id: ConnectionId) -> WsErrorResult<Delivery> {
        self.send_one(
            connection_id,
            &RelayEvent::heartbeat_reply(relay_core::now_millis()),
        )
        .await
    }

    /// Tell every subscriber the snapshot is gone
    pub async fn on_expiry(&self) -> WsErrorResult<FanoutReport> {
        self.fan_out(&RelayEvent::Invalidated).await
    }

    /// Clear the store and notify subscribers if the snapshot has aged past `threshold_ms`.
    /// Returns `None` when nothing expired.
    pub async fn expire_if_stale(
        &self,
        now: i64,
        threshold_ms: u64,
    ) -> WsErrorResult<Option<FanoutReport>> {
        let _turn = self.sequencer.lock().await;

        let Some(expired) = self.store.clear_if_stale(now, threshold_ms).await else {
            return Ok(None);
        };

        self.metrics.snapshot_expired();
        let report = self.on_expiry().await?;
        info!(
            "Snapshot expired after {}ms, notified {} clients",
            expired.age_ms(now),
            report.attempted()
        );

        Ok(Some(report))
    }

    pub async fn status(&self) -> RelayStatus {
        let now = relay_core::now_millis();
        let snapshot = self.store.get().await;

        RelayStatus {
            has_snapshot: snapshot.is_some(),
            clients: self.registry.total_count().await,
            server_time: now,
            snapshot_age_ms: snapshot.map(|s| s.age_ms(now)),
        }
    }

    async fn fan_out(&self, event: &RelayEvent) -> WsErrorResult<FanoutReport> {
        let timer = MetricsTimer::new(self.metrics.clone());
        let message = BroadcastMessage::from_event(event)?;

        let report = self.registry.send_all(&message).await;
        self.metrics.messages_sent(message.message_type, &report);
        timer.finish();

        if report.failed() > 0 {
            warn!(
                "{} delivery skipped for {} of {} clients",
                message.message_type,
                report.failed(),
                report.attempted()
            );
        }

        Ok(report)
    }

    async fn send_one(
        &self,
        connection_id: ConnectionId,
        event: &RelayEvent,
    ) -> WsErrorResult<Delivery> {
        let message = BroadcastMessage::from_event(event)?;
        let delivery = self.registry.send_to(connection_id, &message).await;
        if delivery == Delivery::UnknownConnection {
            self.metrics.delivery_failed(delivery, 1);
        }

        let mut report = FanoutReport::default();
        report.record(delivery);
        self.metrics.messages_sent(message.message_type, &report);

        Ok(delivery)
    }
}

impl Clone for BroadcastRelay {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            registry: self.registry.clone(),
            metrics: self.metrics.clone(),
            sequencer: Arc::clone(&self.sequencer),
        }
    }
}
