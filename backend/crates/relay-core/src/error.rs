use crate::ErrorLocation;

use std::panic::Location;
use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Malformed payload: {message} {location}")]
    MalformedPayload {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unknown client event: {message} {location}")]
    UnknownClientEvent {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON serialization failed: {source} {location}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl CoreError {
    #[track_caller]
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedPayload {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
