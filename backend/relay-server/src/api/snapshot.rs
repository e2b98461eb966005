//! Producer ingestion endpoint

use crate::{ApiError, ApiResult};

use relay_ws::AppState;

use std::panic::Location;

use axum::{Json, extract::State};
use bytes::Bytes;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct IngestResponse {
    pub success: bool,
    /// Subscribers the update was sent to
    pub clients: usize,
}

/// POST /api/snapshot
///
/// Replace the held snapshot with the request body and fan it out.
pub async fn ingest_snapshot(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<IngestResponse>> {
    if state.shutdown.is_shutdown() {
        return Err(ApiError::Unavailable {
            message: "Relay is shutting down".into(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let clients = state.relay.ingest_bytes(&body).await?;
    log::debug!("Snapshot accepted ({} bytes), sent to {clients} clients", body.len());

    Ok(Json(IngestResponse {
        success: true,
        clients,
    }))
}
