mod expiry_monitor;

use crate::{BroadcastRelay, ConnectionLimits, ConnectionRegistry, Metrics};

use relay_core::RelayEvent;

use axum::extract::ws::Message;
use tokio::sync::mpsc;

pub(crate) fn relay_with_limit(max_total: usize) -> BroadcastRelay {
    BroadcastRelay::new(
        ConnectionRegistry::new(ConnectionLimits { max_total }),
        Metrics::new(),
    )
}

pub(crate) fn relay() -> BroadcastRelay {
    relay_with_limit(ConnectionLimits::default().max_total)
}

/// Everything queued for a subscriber so far, decoded
pub(crate) fn drain_events(rx: &mut mpsc::Receiver<Message>) -> Vec<RelayEvent> {
    let mut events = Vec::new();
    while let Ok(message) = rx.try_recv() {
        if let Message::Text(text) = message {
            events.push(serde_json::from_str(text.as_str()).expect("relay sends valid events"));
        }
    }
    events
}

pub(crate) fn update_payload(event: &RelayEvent) -> Option<&serde_json::Value> {
    match event {
        RelayEvent::Update(snapshot) => snapshot.payload.get("x"),
        _ => None,
    }
}
