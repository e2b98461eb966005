use crate::{Result, Snapshot};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events pushed from the relay to subscribers.
///
/// Serialized as `{"event": "<name>", "data": {...}}`; `invalidated` carries no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum RelayEvent {
    Update(Snapshot),
    Status(ConnectionStatus),
    Invalidated,
    HeartbeatReply(HeartbeatReply),
}

/// Sent once to every subscriber right after it connects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub client_id: Uuid,
    pub server_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatReply {
    pub timestamp: i64,
}

impl RelayEvent {
    pub fn update(snapshot: Snapshot) -> Self {
        Self::Update(snapshot)
    }

    pub fn status(client_id: Uuid, server_time: i64) -> Self {
        Self::Status(ConnectionStatus {
            connected: true,
            client_id,
            server_time,
        })
    }

    pub fn heartbeat_reply(timestamp: i64) -> Self {
        Self::HeartbeatReply(HeartbeatReply { timestamp })
    }

    /// Wire name of the event, also used as a metrics label
    pub fn name(&self) -> &'static str {
        match self {
            Self::Update(_) => "update",
            Self::Status(_) => "status",
            Self::Invalidated => "invalidated",
            Self::HeartbeatReply(_) => "heartbeat-reply",
        }
    }

    #[track_caller]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
