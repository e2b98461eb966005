use crate::{BroadcastRelay, ShutdownGuard};

use relay_config::FreshnessConfig;

use std::time::Duration;

use log::{error, info};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Timing for the staleness sweep
#[derive(Debug, Clone, Copy)]
pub struct ExpiryConfig {
    pub stale_after: Duration,
    pub sweep_interval: Duration,
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self::from(&FreshnessConfig::default())
    }
}

impl From<&FreshnessConfig> for ExpiryConfig {
    fn from(freshness: &FreshnessConfig) -> Self {
        Self {
            stale_after: freshness.stale_after(),
            sweep_interval: freshness.sweep_interval(),
        }
    }
}

/// Periodically clears a snapshot that has outlived the staleness threshold
pub struct ExpiryMonitor {
    relay: BroadcastRelay,
    config: ExpiryConfig,
}

impl ExpiryMonitor {
    pub fn new(relay: BroadcastRelay, config: ExpiryConfig) -> Self {
        Self { relay, config }
    }

    fn threshold_ms(&self) -> u64 {
        u64::try_from(self.config.stale_after.as_millis()).unwrap_or(u64::MAX)
    }

    /// Run one sweep against the current clock
    pub async fn sweep(&self) -> bool {
        self.sweep_at(relay_core::now_millis()).await
    }

    /// Run one sweep as of `now`; true if a snapshot was invalidated
    pub async fn sweep_at(&self, now: i64) -> bool {
        match self.relay.expire_if_stale(now, self.threshold_ms()).await {
            Ok(expired) => expired.is_some(),
            Err(e) => {
                error!("Expiry sweep failed: {e}");
                false
            }
        }
    }

    /// Sweep on a fixed interval until shutdown
    pub fn spawn(self, mut shutdown: ShutdownGuard) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(self.config.sweep_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!(
                "Expiry monitor started (threshold {}ms, every {}ms)",
                self.config.stale_after.as_millis(),
                self.config.sweep_interval.as_millis()
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.sweep().await;
                    }
                    _ = shutdown.wait() => {
                        info!("Expiry monitor stopping");
                        break;
                    }
                }
            }
        })
    }
}
