use crate::ConnectionId;

use axum::extract::ws::Message;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

/// Information about an active subscriber connection
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connection_id: ConnectionId,
    /// Peer address as reported by the transport, or "unknown"
    pub origin: String,
    pub connected_at: DateTime<Utc>,
    /// Outbound queue drained by the connection's writer task
    pub sender: mpsc::Sender<Message>,
}
