//! Projection helpers over the generic JSON tree.
//!
//! Service responses are decoded to `serde_json::Value` first and projected
//! into typed value objects from there, so unexpected extra fields never
//! break parsing. Absent fields take a type-appropriate default; fields that
//! are present with the wrong type are an error.

use chrono::{DateTime, Utc};
use cubby_core::{Error, Result};
use serde_json::{Map, Value};

pub(crate) type JsonMap = Map<String, Value>;

/// Parse a JSON object from a response body.
pub(crate) fn parse_map(json: &str) -> Result<JsonMap> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(Error::response_invalid(format!(
            "expected a JSON object, got: {other}"
        ))),
        Err(err) => Err(Error::response_invalid("malformed JSON response").with_source(err)),
    }
}

/// Parse a JSON array from a response body.
pub(crate) fn parse_list(json: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Array(list)) => Ok(list),
        Ok(other) => Err(Error::response_invalid(format!(
            "expected a JSON array, got: {other}"
        ))),
        Err(err) => Err(Error::response_invalid("malformed JSON response").with_source(err)),
    }
}

/// A string field; absent or null yields `None`.
pub(crate) fn as_string(map: &JsonMap, key: &str) -> Result<Option<String>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(type_mismatch(key, "a string", other)),
    }
}

/// A non-negative integer field; absent or null yields 0.
pub(crate) fn as_u64(map: &JsonMap, key: &str) -> Result<u64> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f as u64))
            .ok_or_else(|| type_mismatch(key, "a non-negative number", &map[key])),
        Some(other) => Err(type_mismatch(key, "a number", other)),
    }
}

/// A boolean field; absent or null yields false.
pub(crate) fn as_bool(map: &JsonMap, key: &str) -> Result<bool> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(type_mismatch(key, "a boolean", other)),
    }
}

/// An RFC 2822 date field ("Sat, 12 Jan 2008 23:10:10 +0000"); absent or
/// null yields `None`.
pub(crate) fn as_date(map: &JsonMap, key: &str) -> Result<Option<DateTime<Utc>>> {
    match as_string(map, key)? {
        None => Ok(None),
        Some(s) => DateTime::parse_from_rfc2822(&s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|err| {
                Error::response_invalid(format!("'{key}' is not a valid date: '{s}'"))
                    .with_source(err)
            }),
    }
}

fn type_mismatch(key: &str, expected: &str, value: &Value) -> Error {
    Error::response_invalid(format!("'{key}' is not {expected}: {value}"))
}
