pub mod app_state;
pub mod broadcast_message;
pub mod broadcast_relay;
pub mod client_origin;
pub mod connection_config;
pub mod connection_id;
pub mod connection_info;
pub mod connection_limits;
pub mod connection_registry;
pub mod delivery;
pub mod error;
pub mod expiry_monitor;
pub mod metrics;
pub mod metrics_timer;
pub mod relay_status;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod snapshot_store;
pub mod web_socket_connection;

pub use app_state::{AppState, handler};
pub use broadcast_message::BroadcastMessage;
pub use broadcast_relay::BroadcastRelay;
pub use client_origin::ClientOrigin;
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_info::ConnectionInfo;
pub use connection_limits::ConnectionLimits;
pub use connection_registry::ConnectionRegistry;
pub use delivery::{Delivery, FanoutReport};
pub use error::{Result, WsError};
pub use expiry_monitor::{ExpiryConfig, ExpiryMonitor};
pub use metrics::Metrics;
pub use metrics_timer::MetricsTimer;
pub use relay_status::RelayStatus;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use snapshot_store::SnapshotStore;
pub use web_socket_connection::WebSocketConnection;

#[cfg(test)]
mod tests;

use tracing::info_span;

/// Create a tracing span for a subscriber connection.
/// All log entries within the connection task will include these fields.
pub fn create_connection_span(connection_id: &ConnectionId, origin: &str) -> tracing::Span {
    info_span!(
        "ws_connection",
        connection_id = %connection_id,
        origin = %origin,
    )
}
