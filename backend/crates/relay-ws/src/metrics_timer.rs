use crate::Metrics;

use std::time::Instant;

/// Times a fan-out from construction until `finish`
pub struct MetricsTimer {
    start: Instant,
    metrics: Metrics,
}

impl MetricsTimer {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    pub fn finish(self) {
        self.metrics.fanout_latency(self.start.elapsed());
    }
}
