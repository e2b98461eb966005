use crate::{api, health};

use relay_config::CorsConfig;
use relay_ws::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use http::{HeaderValue, Method, header};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(
    state: AppState,
    cors: &CorsConfig,
    prometheus: Option<PrometheusHandle>,
) -> Router {
    // Plain HTTP routes are compressed; the upgrade route is left alone
    let http_routes = Router::new()
        .route("/", get(api::status::relay_status))
        .route("/api/status", get(api::status::relay_status))
        .route("/api/snapshot", post(api::snapshot::ingest_snapshot))
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .layer(CompressionLayer::new());

    let mut router = Router::new()
        .route("/ws", get(relay_ws::handler))
        .merge(http_routes);

    if let Some(handle) = prometheus {
        router = router.route("/metrics", get(move || std::future::ready(handle.render())));
    }

    router.with_state(state).layer(cors_layer(cors))
}

/// CORS for browser producers and subscribers.
/// "*" allows any origin without credentials; otherwise only the listed origins, with credentials.
pub fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if cors.allows_any() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring unusable CORS origin {origin:?}");
                None
            }
        })
        .collect();

    layer
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}
