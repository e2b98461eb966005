use crate::{CoreError, ErrorLocation, Result};

use std::panic::Location;

use serde::{Deserialize, Serialize};

/// Events a subscriber may send to the relay over its text channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Liveness probe; answered with a `heartbeat-reply` to the sender only
    #[serde(alias = "ping")]
    HeartbeatProbe,
}

impl ClientEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeartbeatProbe => "heartbeat-probe",
        }
    }

    #[track_caller]
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| CoreError::UnknownClientEvent {
            message: format!("{e}: {}", truncate(text, 64)),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
