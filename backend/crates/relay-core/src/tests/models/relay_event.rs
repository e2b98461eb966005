use crate::{RelayEvent, Snapshot};

use serde_json::{Value, json};
use uuid::Uuid;

fn to_value(event: &RelayEvent) -> Value {
    serde_json::from_str(&event.to_json().unwrap()).unwrap()
}

#[test]
fn test_update_wire_format() {
    let snapshot = Snapshot::from_value(json!({"x": 1}), 1_700_000_000_000).unwrap();

    let value = to_value(&RelayEvent::update(snapshot));

    assert_eq!(
        value,
        json!({
            "event": "update",
            "data": {"payload": {"x": 1}, "received_at": 1_700_000_000_000_i64}
        })
    );
}

#[test]
fn test_status_wire_format() {
    let client_id = Uuid::new_v4();

    let value = to_value(&RelayEvent::status(client_id, 99));

    assert_eq!(value["event"], "status");
    assert_eq!(value["data"]["connected"], true);
    assert_eq!(value["data"]["client_id"], client_id.to_string());
    assert_eq!(value["data"]["server_time"], 99);
}

#[test]
fn test_invalidated_has_no_data() {
    let value = to_value(&RelayEvent::Invalidated);

    assert_eq!(value, json!({"event": "invalidated"}));
}

#[test]
fn test_heartbeat_reply_wire_format() {
    let value = to_value(&RelayEvent::heartbeat_reply(123));

    assert_eq!(value, json!({"event": "heartbeat-reply", "data": {"timestamp": 123}}));
}

#[test]
fn test_event_names_match_wire_tags() {
    let snapshot = Snapshot::from_value(json!({}), 0).unwrap();
    let events = [
        RelayEvent::update(snapshot),
        RelayEvent::status(Uuid::new_v4(), 0),
        RelayEvent::Invalidated,
        RelayEvent::heartbeat_reply(0),
    ];

    for event in events {
        assert_eq!(to_value(&event)["event"], event.name());
    }
}

#[test]
fn test_wire_text_parses_back_into_event() {
    let event = RelayEvent::status(Uuid::new_v4(), 5);

    let parsed: RelayEvent = serde_json::from_str(&event.to_json().unwrap()).unwrap();

    assert_eq!(parsed, event);
}
