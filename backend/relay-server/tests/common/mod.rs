#![allow(dead_code)]

//! Test infrastructure for relay-server API tests

use relay_config::CorsConfig;
use relay_ws::{
    AppState, BroadcastRelay, ConnectionConfig, ConnectionLimits, ConnectionRegistry, Metrics,
    ShutdownCoordinator,
};

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use tokio::sync::mpsc;

/// Create AppState for testing
pub fn create_test_app_state() -> AppState {
    let metrics = Metrics::new();
    let registry = ConnectionRegistry::new(ConnectionLimits { max_total: 10000 });

    AppState {
        relay: BroadcastRelay::new(registry, metrics.clone()),
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::default(),
    }
}

pub fn create_test_router(state: &AppState) -> Router {
    relay_server::build_router(state.clone(), &CorsConfig::default(), None)
}

/// Register an in-process subscriber and return its outbound queue
pub async fn attach_subscriber(state: &AppState) -> mpsc::Receiver<axum::extract::ws::Message> {
    let (tx, mut rx) = mpsc::channel(32);
    state
        .relay
        .on_connect("test".into(), tx)
        .await
        .expect("subscriber registers");
    // Discard the status frame
    while rx.try_recv().is_ok() {}
    rx
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}
