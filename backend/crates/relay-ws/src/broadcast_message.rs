use crate::Result as WsErrorResult;

use relay_core::RelayEvent;

use axum::extract::ws::{Message, Utf8Bytes};

/// A relay event serialized once and shared by every recipient
#[derive(Debug, Clone)]
pub struct BroadcastMessage {
    /// JSON text frame, ready to send on the wire
    pub payload: Utf8Bytes,
    /// Event name for metrics/logging
    pub message_type: &'static str,
}

impl BroadcastMessage {
    pub fn new(payload: impl Into<Utf8Bytes>, message_type: &'static str) -> Self {
        Self {
            payload: payload.into(),
            message_type,
        }
    }

    #[track_caller]
    pub fn from_event(event: &RelayEvent) -> WsErrorResult<Self> {
        Ok(Self::new(event.to_json()?, event.name()))
    }

    /// Frame for the transport; cloning shares the underlying buffer
    pub fn to_ws_message(&self) -> Message {
        Message::Text(self.payload.clone())
    }
}
