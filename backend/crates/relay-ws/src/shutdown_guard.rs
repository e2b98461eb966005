use crate::ShutdownCoordinator;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

/// Helper for gracefully handling shutdown in async tasks
pub struct ShutdownGuard {
    shutdown_rx: broadcast::Receiver<()>,
    triggered: Arc<AtomicBool>,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            shutdown_rx: coordinator.subscribe(),
            triggered: Arc::clone(coordinator.triggered_flag()),
        }
    }

    /// Wait for shutdown signal. Returns immediately if it already fired,
    /// including before this guard subscribed.
    pub async fn wait(&mut self) {
        if self.triggered.load(Ordering::SeqCst) {
            return;
        }
        let _ = self.shutdown_rx.recv().await;
    }

    /// Poll for shutdown signal (non-blocking)
    pub fn poll_shutdown(&mut self) -> bool {
        self.triggered.load(Ordering::SeqCst) || self.shutdown_rx.try_recv().is_ok()
    }
}
