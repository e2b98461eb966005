#![allow(dead_code)]

use relay_ws::{
    AppState, BroadcastRelay, ConnectionConfig, ConnectionLimits, ConnectionRegistry, Metrics,
    ShutdownCoordinator,
};

use std::time::Duration;

use axum::{Router, routing::get};
use axum_test::TestServer;

/// Configuration for test server instances
#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub max_connections_total: usize,
    pub send_buffer_size: usize,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            max_connections_total: 100,
            send_buffer_size: ConnectionConfig::default().send_buffer_size,
        }
    }
}

impl TestServerConfig {
    /// Create config with strict connection limits (for limit tests)
    pub fn with_strict_limits() -> Self {
        Self {
            max_connections_total: 2,
            ..Default::default()
        }
    }
}

/// Test server with access to AppState for testing
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
}

impl TestServerWithState {
    /// Poll until the registry reports `expected` subscribers or the deadline passes
    pub async fn wait_for_clients(&self, expected: usize) -> usize {
        let registry = self.app_state.relay.registry();
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        loop {
            let count = registry.total_count().await;
            if count == expected || tokio::time::Instant::now() >= deadline {
                return count;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

/// Create a TestServer with default configuration
pub fn create_test_server() -> TestServerWithState {
    create_test_server_with_config(TestServerConfig::default())
}

/// Create a TestServer with custom configuration
pub fn create_test_server_with_config(config: TestServerConfig) -> TestServerWithState {
    let (app, app_state) = create_app(config);
    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server");

    TestServerWithState { server, app_state }
}

fn create_app(config: TestServerConfig) -> (Router, AppState) {
    let registry = ConnectionRegistry::new(ConnectionLimits {
        max_total: config.max_connections_total,
    });
    let metrics = Metrics::default();
    let relay = BroadcastRelay::new(registry, metrics.clone());

    let app_state = AppState {
        relay,
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig {
            send_buffer_size: config.send_buffer_size,
            ..ConnectionConfig::default()
        },
    };

    let router = Router::new()
        .route("/ws", get(relay_ws::handler))
        .with_state(app_state.clone());

    (router, app_state)
}
