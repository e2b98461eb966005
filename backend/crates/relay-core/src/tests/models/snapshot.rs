use crate::{CoreError, Snapshot};

use googletest::assert_that;
use googletest::prelude::{anything, eq, ok};
use serde_json::json;

#[test]
fn given_json_object_when_from_value_then_ok() {
    let result = Snapshot::from_value(json!({"x": 1, "players": []}), 42);

    assert_that!(result, ok(anything()));
    let snapshot = result.unwrap();
    assert_that!(snapshot.received_at, eq(42));
    assert_that!(snapshot.payload.get("x"), eq(Some(&json!(1))));
}

#[test]
fn given_array_when_from_value_then_malformed() {
    let result = Snapshot::from_value(json!([1, 2, 3]), 0);

    assert!(matches!(result, Err(CoreError::MalformedPayload { .. })));
}

#[test]
fn given_scalar_values_when_from_value_then_all_malformed() {
    for value in [json!(null), json!(true), json!(7), json!("radar")] {
        let result = Snapshot::from_value(value, 0);
        assert!(matches!(result, Err(CoreError::MalformedPayload { .. })));
    }
}

#[test]
fn given_invalid_json_bytes_when_from_slice_then_malformed() {
    let result = Snapshot::from_slice(b"{\"x\": 1", 0);

    assert!(matches!(result, Err(CoreError::MalformedPayload { .. })));
}

#[test]
fn given_valid_json_bytes_when_from_slice_then_payload_preserved() {
    let snapshot = Snapshot::from_slice(br#"{"map":"de_dust2","round":3}"#, 10).unwrap();

    assert_eq!(snapshot.payload["map"], json!("de_dust2"));
    assert_eq!(snapshot.payload["round"], json!(3));
}

#[test]
fn given_age_equal_to_threshold_when_checked_then_not_older() {
    let snapshot = Snapshot::from_value(json!({}), 1_000).unwrap();

    assert!(!snapshot.is_older_than(31_000, 30_000));
    assert!(snapshot.is_older_than(31_001, 30_000));
}

#[test]
fn given_clock_behind_receipt_when_checked_then_not_older() {
    let snapshot = Snapshot::from_value(json!({}), 5_000).unwrap();

    assert_eq!(snapshot.age_ms(4_000), -1_000);
    assert!(!snapshot.is_older_than(4_000, 0));
}
