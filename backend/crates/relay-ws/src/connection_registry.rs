use crate::{
    BroadcastMessage, ConnectionId, ConnectionInfo, ConnectionLimits, Delivery, FanoutReport,
    Result as WsErrorResult, WsError,
};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

use axum::extract::ws::Message;
use error_location::ErrorLocation;
use log::{debug, info, warn};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::RwLock;

/// Registry for tracking active subscriber connections
pub struct ConnectionRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    limits: ConnectionLimits,
}

struct RegistryInner {
    /// All active connections by connection_id
    connections: HashMap<ConnectionId, ConnectionInfo>,
}

impl ConnectionRegistry {
    pub fn new(limits: ConnectionLimits) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                connections: HashMap::new(),
            })),
            limits,
        }
    }

    /// Register a new connection, returns ConnectionId if successful
    pub async fn register(
        &self,
        origin: String,
        sender: mpsc::Sender<Message>,
    ) -> WsErrorResult<ConnectionId> {
        let mut inner = self.inner.write().await;

        if inner.connections.len() >= self.limits.max_total {
            warn!(
                "Total connection limit reached: {}/{}",
                inner.connections.len(),
                self.limits.max_total
            );
            return Err(WsError::ConnectionLimitExceeded {
                current: inner.connections.len(),
                max: self.limits.max_total,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let connection_id = ConnectionId::new();
        let info = ConnectionInfo {
            connection_id,
            origin,
            connected_at: chrono::Utc::now(),
            sender,
        };

        inner.connections.insert(connection_id, info);
        info!(
            "Client connected: {connection_id} (Total: {})",
            inner.connections.len()
        );

        Ok(connection_id)
    }

    /// Unregister a connection. Unknown ids are ignored, so repeated calls are harmless.
    pub async fn unregister(&self, connection_id: ConnectionId) -> bool {
        let mut inner = self.inner.write().await;

        if inner.connections.remove(&connection_id).is_some() {
            info!(
                "Client disconnected: {connection_id} (Total: {})",
                inner.connections.len()
            );
            true
        } else {
            debug!("Ignoring unregister for unknown connection {connection_id}");
            false
        }
    }

    /// Get information about a specific connection
    pub async fn get(&self, connection_id: ConnectionId) -> Option<ConnectionInfo> {
        let inner = self.inner.read().await;
        inner.connections.get(&connection_id).cloned()
    }

    /// Get total connection count
    pub async fn total_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.connections.len()
    }

    /// True when no further connection would be accepted
    pub async fn is_full(&self) -> bool {
        self.total_count().await >= self.limits.max_total
    }

    /// Visit every registered connection; order is unspecified
    pub async fn for_each<F>(&self, mut callback: F)
    where
        F: FnMut(&ConnectionInfo),
    {
        let inner = self.inner.read().await;
        for info in inner.connections.values() {
            callback(info);
        }
    }

    /// Queue a message for a single connection without waiting
    pub async fn send_to(&self, connection_id: ConnectionId, message: &BroadcastMessage) -> Delivery {
        let inner = self.inner.read().await;
        match inner.connections.get(&connection_id) {
            Some(info) => Self::try_deliver(info, message),
            None => Delivery::UnknownConnection,
        }
    }

    /// Queue a message for every connection; slow or closed subscribers are skipped
    pub async fn send_all(&self, message: &BroadcastMessage) -> FanoutReport {
        let mut report = FanoutReport::default();
        self.for_each(|info| report.record(Self::try_deliver(info, message)))
            .await;
        report
    }

    fn try_deliver(info: &ConnectionInfo, message: &BroadcastMessage) -> Delivery {
        match info.sender.try_send(message.to_ws_message()) {
            Ok(()) => Delivery::Delivered,
            Err(TrySendError::Full(_)) => {
                warn!(
                    "Dropping {} for slow client {} (send buffer full)",
                    message.message_type, info.connection_id
                );
                Delivery::Dropped
            }
            Err(TrySendError::Closed(_)) => {
                debug!(
                    "Skipping {} for closing client {}",
                    message.message_type, info.connection_id
                );
                Delivery::Closed
            }
        }
    }
}

impl Clone for ConnectionRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            limits: self.limits.clone(),
        }
    }
}
