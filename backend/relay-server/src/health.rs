use relay_ws::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - Health check with component status
pub async fn health_check(State(state): State<AppState>) -> Response {
    let relay = state.relay.status().await;
    let shutting_down = state.shutdown.is_shutdown();

    let health = json!({
        "status": if shutting_down { "shutting_down" } else { "healthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "websocket": {
                "status": if shutting_down { "draining" } else { "operational" },
                "clients": relay.clients,
            },
            "snapshot": {
                "status": if relay.has_snapshot { "held" } else { "empty" },
                "age_ms": relay.snapshot_age_ms,
            },
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    let code = if shutting_down {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (code, Json(health)).into_response()
}

/// GET /live - Liveness probe (is the process alive?)
pub async fn liveness_check() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - Readiness probe; not ready once shutdown has begun
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    if state.shutdown.is_shutdown() {
        return (StatusCode::SERVICE_UNAVAILABLE, "Shutting down").into_response();
    }

    (StatusCode::OK, "Ready").into_response()
}
