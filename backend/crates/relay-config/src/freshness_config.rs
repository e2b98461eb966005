use crate::{ConfigError, ConfigErrorResult, check_range};

use std::time::Duration;

use serde::Deserialize;

// Staleness threshold constraints (milliseconds)
pub const MIN_STALE_AFTER_MS: u64 = 100;
pub const MAX_STALE_AFTER_MS: u64 = 86_400_000;
pub const DEFAULT_STALE_AFTER_MS: u64 = 30_000;

// Expiry sweep interval constraints (milliseconds)
pub const MIN_SWEEP_INTERVAL_MS: u64 = 10;
pub const MAX_SWEEP_INTERVAL_MS: u64 = 3_600_000;
pub const DEFAULT_SWEEP_INTERVAL_MS: u64 = 5_000;

/// How long a snapshot stays valid and how often that is checked.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FreshnessConfig {
    /// Snapshots older than this are invalidated
    pub stale_after_ms: u64,
    /// Cadence of the expiry sweep
    pub sweep_interval_ms: u64,
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self {
            stale_after_ms: DEFAULT_STALE_AFTER_MS,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
        }
    }
}

impl FreshnessConfig {
    pub fn stale_after(&self) -> Duration {
        Duration::from_millis(self.stale_after_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        check_range(
            "freshness.stale_after_ms",
            self.stale_after_ms,
            MIN_STALE_AFTER_MS,
            MAX_STALE_AFTER_MS,
        )?;
        check_range(
            "freshness.sweep_interval_ms",
            self.sweep_interval_ms,
            MIN_SWEEP_INTERVAL_MS,
            MAX_SWEEP_INTERVAL_MS,
        )?;

        if self.sweep_interval_ms > self.stale_after_ms {
            return Err(ConfigError::freshness(format!(
                "freshness.sweep_interval_ms ({}) must not exceed stale_after_ms ({})",
                self.sweep_interval_ms, self.stale_after_ms
            )));
        }

        Ok(())
    }
}
