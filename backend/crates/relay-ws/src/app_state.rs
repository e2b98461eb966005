use crate::{
    BroadcastRelay, ClientOrigin, ConnectionConfig, Metrics, ShutdownCoordinator,
    WebSocketConnection, WsError,
};

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::Response,
};

use log::{debug, warn};

/// Shared application state for HTTP and WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    pub relay: BroadcastRelay,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}

/// WebSocket upgrade handler
pub async fn handler(
    State(state): State<AppState>,
    ClientOrigin(origin): ClientOrigin,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    if state.shutdown.is_shutdown() {
        debug!("Rejecting upgrade from {origin}: shutting down");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    // Early refusal; the registry re-checks after the upgrade
    if state.relay.registry().is_full().await {
        warn!("Rejecting upgrade from {origin}: connection limit reached");
        state.metrics.connection_rejected();
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, origin, state)))
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(socket: WebSocket, origin: String, state: AppState) {
    let shutdown_guard = state.shutdown.subscribe_guard();

    let connection = WebSocketConnection::new(state.relay, state.config, state.metrics.clone());

    match connection.handle(socket, origin, shutdown_guard).await {
        Ok(()) => {}
        Err(WsError::ConnectionLimitExceeded { .. }) => {}
        Err(e) => {
            state.metrics.error_occurred(e.error_code());
            debug!("Connection ended with error: {e}");
        }
    }
}
