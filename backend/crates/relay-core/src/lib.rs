pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::client_event::ClientEvent;
pub use models::relay_event::{ConnectionStatus, HeartbeatReply, RelayEvent};
pub use models::snapshot::Snapshot;

/// Current wall-clock time as milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
