use crate::{CoreError, Result};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The most recent producer payload together with the time it was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Producer-supplied object, relayed verbatim
    pub payload: Map<String, Value>,
    /// Receipt time in milliseconds since the Unix epoch
    pub received_at: i64,
}

impl Snapshot {
    pub fn new(payload: Map<String, Value>, received_at: i64) -> Self {
        Self {
            payload,
            received_at,
        }
    }

    /// Build a snapshot from an arbitrary JSON value.
    ///
    /// Only JSON objects are accepted; anything else is a malformed payload.
    #[track_caller]
    pub fn from_value(value: Value, received_at: i64) -> Result<Self> {
        match value {
            Value::Object(payload) => Ok(Self::new(payload, received_at)),
            other => Err(CoreError::malformed(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parse raw request bytes into a snapshot.
    #[track_caller]
    pub fn from_slice(body: &[u8], received_at: i64) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| CoreError::malformed(format!("invalid JSON: {e}")))?;
        Self::from_value(value, received_at)
    }

    /// Milliseconds elapsed since receipt (negative if `now` precedes it).
    pub fn age_ms(&self, now: i64) -> i64 {
        now.saturating_sub(self.received_at)
    }

    /// True once the snapshot has aged strictly past `threshold_ms`.
    pub fn is_older_than(&self, now: i64, threshold_ms: u64) -> bool {
        self.age_ms(now) > i64::try_from(threshold_ms).unwrap_or(i64::MAX)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
