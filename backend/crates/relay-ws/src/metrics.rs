use crate::{Delivery, FanoutReport};

use metrics::{counter, gauge, histogram};

/// Metrics collector for relay operations
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "relay" }
    }

    /// Record new subscriber connection established
    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record subscriber connection closed
    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    /// Record connection refused because the registry is full
    pub fn connection_rejected(&self) {
        counter!(format!("{}.connections.rejected", self.prefix)).increment(1);
    }

    /// Record message received from a subscriber
    pub fn message_received(&self, message_type: &str) {
        counter!(format!("{}.messages.received", self.prefix)).increment(1);
        counter!(format!(
            "{}.messages.received.{}",
            self.prefix, message_type
        ))
        .increment(1);
    }

    /// Record the outcome of a fan-out or a single delivery
    pub fn messages_sent(&self, message_type: &str, report: &FanoutReport) {
        let delivered = report.delivered as u64;
        counter!(format!("{}.messages.sent", self.prefix)).increment(delivered);
        counter!(format!("{}.messages.sent.{}", self.prefix, message_type)).increment(delivered);

        for (outcome, count) in [
            (Delivery::Dropped, report.dropped),
            (Delivery::Closed, report.closed),
        ] {
            if count > 0 {
                self.delivery_failed(outcome, count);
            }
        }
    }

    /// Record messages that could not be queued for a subscriber
    pub fn delivery_failed(&self, outcome: Delivery, count: usize) {
        counter!(format!("{}.delivery.{}", self.prefix, outcome.as_str()))
            .increment(count as u64);
    }

    /// Record accepted snapshot
    pub fn snapshot_ingested(&self, subscriber_count: usize) {
        counter!(format!("{}.snapshots.ingested", self.prefix)).increment(1);
        gauge!(format!("{}.broadcast.subscribers", self.prefix)).set(subscriber_count as f64);
    }

    /// Record snapshot cleared for staleness
    pub fn snapshot_expired(&self) {
        counter!(format!("{}.snapshots.expired", self.prefix)).increment(1);
    }

    /// Record error occurrence
    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }

    /// Record fan-out latency
    pub fn fanout_latency(&self, duration: std::time::Duration) {
        histogram!(format!("{}.broadcast.latency_ms", self.prefix))
            .record(duration.as_secs_f64() * 1000.0);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
