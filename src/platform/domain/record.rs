//! Untyped row representation exchanged with the data platform.

use chrono::{DateTime, FixedOffset};
use serde::{Serialize, de::DeserializeOwned, ser::Error as _};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// A single row: column name to JSON value.
pub type Record = Map<String, Value>;

/// Serializes a domain value into a record.
///
/// # Errors
///
/// Returns a serialization error when the value does not serialize to a
/// JSON object.
pub fn to_record<T: Serialize>(value: &T) -> Result<Record, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(serde_json::Error::custom(format!(
            "expected a JSON object, found {other}"
        ))),
    }
}

/// Deserializes a record into a domain value.
///
/// # Errors
///
/// Returns a deserialization error when the record does not match `T`.
pub fn from_record<T: DeserializeOwned>(record: Record) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(record))
}

/// Compares two non-null JSON scalars the way the platform orders columns.
///
/// Strings that both parse as RFC 3339 timestamps compare chronologically so
/// that differing fractional-second precision does not disturb ordering.
/// Returns `None` for mismatched or non-scalar types.
#[must_use]
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Bool(l), Value::Bool(r)) => Some(l.cmp(r)),
        (Value::Number(l), Value::Number(r)) => match (l.as_i64(), r.as_i64()) {
            (Some(li), Some(ri)) => Some(li.cmp(&ri)),
            _ => l.as_f64()?.partial_cmp(&r.as_f64()?),
        },
        (Value::String(l), Value::String(r)) => Some(
            match (parse_timestamp(l), parse_timestamp(r)) {
                (Some(lt), Some(rt)) => lt.cmp(&rt),
                _ => l.cmp(r),
            },
        ),
        _ => None,
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}
