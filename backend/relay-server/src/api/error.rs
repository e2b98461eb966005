//! REST API error types
//!
//! These errors produce consistent JSON responses with appropriate HTTP
//! status codes.

use relay_ws::WsError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code and message
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "MALFORMED_PAYLOAD")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Producer sent something that is not a JSON object (400)
    #[error("Malformed payload: {message} {location}")]
    MalformedPayload {
        message: String,
        location: ErrorLocation,
    },

    /// Relay is shutting down (503)
    #[error("Service unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MalformedPayload { message, location } => {
                log::warn!("Rejected producer payload: {message} {location}");
                (
                    StatusCode::BAD_REQUEST,
                    ApiErrorBody {
                        code: "MALFORMED_PAYLOAD".into(),
                        message,
                    },
                )
            }
            ApiError::Unavailable { message, .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiErrorBody {
                    code: "UNAVAILABLE".into(),
                    message,
                },
            ),
            ApiError::Internal { message, location } => {
                log::error!("Internal error: {message} {location}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".into(),
                        message: "Failed to process snapshot".into(),
                    },
                )
            }
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Convert relay errors to API errors
impl From<WsError> for ApiError {
    #[track_caller]
    fn from(e: WsError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            WsError::MalformedPayload { message, .. } => ApiError::MalformedPayload { message, location },
            other => ApiError::Internal {
                message: other.to_string(),
                location,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
