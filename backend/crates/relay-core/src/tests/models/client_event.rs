use crate::{ClientEvent, CoreError};

#[test]
fn test_parse_heartbeat_probe() {
    let event = ClientEvent::parse(r#"{"event":"heartbeat-probe"}"#).unwrap();

    assert_eq!(event, ClientEvent::HeartbeatProbe);
    assert_eq!(event.as_str(), "heartbeat-probe");
}

#[test]
fn test_parse_legacy_ping_alias() {
    let event = ClientEvent::parse(r#"{"event":"ping"}"#).unwrap();

    assert_eq!(event, ClientEvent::HeartbeatProbe);
}

#[test]
fn test_parse_ignores_extra_fields() {
    let event = ClientEvent::parse(r#"{"event":"heartbeat-probe","sent_at":1}"#).unwrap();

    assert_eq!(event, ClientEvent::HeartbeatProbe);
}

#[test]
fn test_parse_unknown_event_fails() {
    let result = ClientEvent::parse(r#"{"event":"subscribe"}"#);

    assert!(matches!(result, Err(CoreError::UnknownClientEvent { .. })));
}

#[test]
fn test_parse_garbage_fails() {
    let result = ClientEvent::parse("not json at all");

    assert!(matches!(result, Err(CoreError::UnknownClientEvent { .. })));
}
