use crate::ApiError;

use relay_ws::WsError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn given_malformed_payload_when_rendered_then_400_with_code() {
    let error = ApiError::MalformedPayload {
        message: "expected a JSON object, got array".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "MALFORMED_PAYLOAD");
    assert_eq!(json["error"]["message"], "expected a JSON object, got array");
}

#[tokio::test]
async fn given_internal_error_when_rendered_then_500_without_details() {
    let error = ApiError::Internal {
        message: "serialization failed: secret detail".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert!(!json["error"]["message"].as_str().unwrap().contains("secret"));
}

#[tokio::test]
async fn given_unavailable_when_rendered_then_503() {
    let error = ApiError::Unavailable {
        message: "Relay is shutting down".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    assert_eq!(error.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn given_ws_malformed_payload_when_converted_then_malformed_payload() {
    let ws_error = WsError::MalformedPayload {
        message: "invalid JSON".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let api_error = ApiError::from(ws_error);

    assert!(matches!(api_error, ApiError::MalformedPayload { ref message, .. } if message == "invalid JSON"));
}

#[test]
fn given_other_ws_error_when_converted_then_internal() {
    let ws_error = WsError::Internal {
        message: "boom".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    assert!(matches!(ApiError::from(ws_error), ApiError::Internal { .. }));
}
