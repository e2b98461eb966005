use serde::Serialize;

/// Point-in-time view of the relay for the status and health routes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayStatus {
    pub has_snapshot: bool,
    pub clients: usize,
    pub server_time: i64,
    /// Age of the held snapshot, if any
    pub snapshot_age_ms: Option<i64>,
}
