use relay_ws::AppState;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

pub const STATUS_RUNNING: &str = "Snapshot relay running";
pub const STATUS_SHUTTING_DOWN: &str = "Snapshot relay shutting down";

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub clients: usize,
    pub has_data: bool,
    /// RFC 3339 server time
    pub timestamp: String,
}

/// GET / and GET /api/status
pub async fn relay_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let relay = state.relay.status().await;
    let status = if state.shutdown.is_shutdown() {
        STATUS_SHUTTING_DOWN
    } else {
        STATUS_RUNNING
    };

    Json(StatusResponse {
        status: status.into(),
        clients: relay.clients,
        has_data: relay.has_snapshot,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
