use relay_server::error::ServerError;
use relay_server::{build_router, logger};

use relay_config::Config;
use relay_ws::{
    AppState, BroadcastRelay, ConnectionConfig, ConnectionLimits, ConnectionRegistry,
    ExpiryConfig, ExpiryMonitor, Metrics, ShutdownCoordinator,
};

use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

use log::{error, info, warn};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;

/// How long to wait for the expiry monitor after the server stops
const MONITOR_STOP_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional
    let _ = dotenvy::dotenv();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting relay-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let prometheus = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(
                "{}",
                ServerError::Metrics {
                    message: e.to_string()
                }
            );
            None
        }
    };

    let registry = ConnectionRegistry::new(ConnectionLimits::from(&config.server));
    let metrics = Metrics::new();
    let relay = BroadcastRelay::new(registry, metrics.clone());
    let shutdown = ShutdownCoordinator::new();

    let app_state = AppState {
        relay: relay.clone(),
        metrics,
        shutdown: shutdown.clone(),
        config: ConnectionConfig::from(&config.websocket),
    };

    let monitor = ExpiryMonitor::new(relay, ExpiryConfig::from(&config.freshness))
        .spawn(shutdown.subscribe_guard());

    let app = build_router(app_state, &config.cors, prometheus);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: bind_addr.clone(),
            source,
        })?;

    // Actual bound address matters when port is 0
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    tokio::spawn(wait_for_signal(shutdown.clone()));

    info!("Server ready to accept connections");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown({
        let mut guard = shutdown.subscribe_guard();
        async move {
            guard.wait().await;
            info!("Stopped accepting connections");
        }
    })
    .await?;

    // Also stops the monitor if the server exited on its own
    shutdown.shutdown();
    match tokio::time::timeout(MONITOR_STOP_TIMEOUT, monitor).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Expiry monitor task failed: {e}"),
        Err(_) => warn!("Expiry monitor did not stop in time"),
    }

    info!("Graceful shutdown complete");
    Ok(())
}

/// Trigger shutdown on SIGINT (Ctrl+C) or, on Unix, SIGTERM
async fn wait_for_signal(shutdown: ShutdownCoordinator) {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
            Err(e) => {
                error!("Failed to listen for SIGINT: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    shutdown.shutdown();
}
