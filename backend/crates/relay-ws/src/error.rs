use relay_core::CoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Connection limit exceeded: {current} connections (max: {max}) {location}")]
    ConnectionLimitExceeded {
        current: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Malformed payload: {message} {location}")]
    MalformedPayload {
        message: String,
        location: ErrorLocation,
    },

    #[error("Heartbeat timeout after {timeout_secs}s {location}")]
    HeartbeatTimeout {
        timeout_secs: u64,
        location: ErrorLocation,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl WsError {
    /// Machine-readable code, shared with the HTTP error body
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectionClosed { .. } => "CONNECTION_CLOSED",
            Self::ConnectionLimitExceeded { .. } => "CONNECTION_LIMIT",
            Self::MalformedPayload { .. } => "MALFORMED_PAYLOAD",
            Self::HeartbeatTimeout { .. } => "HEARTBEAT_TIMEOUT",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<CoreError> for WsError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match error {
            CoreError::MalformedPayload { message, .. }
            | CoreError::UnknownClientEvent { message, .. } => {
                Self::MalformedPayload { message, location }
            }
            CoreError::Serialization { source, .. } => Self::Internal {
                message: format!("serialization failed: {source}"),
                location,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
