use serde_json::{Map, Value};

/// Record identifiers are plain numbers; the store hands them out from a
/// single counter shared across all collections.
pub type Id = i64;

/// One resource instance as a field-name to value mapping. Records are
/// owned by the store and passed through the pipeline by value for the
/// duration of one request.
pub type Record = Map<String, Value>;

/// The record's identifier, if it carries one.
pub fn record_id(record: &Record) -> Option<Id> {
    record.get("id").and_then(Value::as_i64)
}

/// Millisecond timestamp for the `timestamp` field on stored records.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
