//! Encode/decode helpers.
//!
//! The `try_*` functions propagate [`JsonError`]. The plain helpers log the
//! failure at `error` level and return `None`, so callers never see a codec
//! error.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::error;

use super::error::{JsonError, JsonResult};
use super::quotes::normalize_quotes;

/// Log a codec failure and collapse it to `None`.
fn swallow<T>(result: JsonResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!(error = ?e, "{}", e);
            None
        }
    }
}

/// Drop `null` object members, recursively. Array elements are kept.
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

/// Serialize `data`, keeping `null` members.
pub fn try_to_json_str<T: Serialize + ?Sized>(data: &T) -> JsonResult<String> {
    serde_json::to_string(data).map_err(JsonError::Serialize)
}

/// Serialize `data`, omitting `null` object members.
pub fn try_to_json_str_non_null<T: Serialize + ?Sized>(data: &T) -> JsonResult<String> {
    let mut value = serde_json::to_value(data).map_err(JsonError::Serialize)?;
    strip_nulls(&mut value);
    serde_json::to_string(&value).map_err(JsonError::Serialize)
}

/// Parse `json` into `T`. Unknown fields are ignored.
pub fn try_json_to_bean<T: DeserializeOwned>(json: &str) -> JsonResult<T> {
    serde_json::from_str(&normalize_quotes(json)).map_err(JsonError::Parse)
}

/// Serialize `data` to JSON text. Returns `None` (and logs) on failure.
pub fn to_json_str<T: Serialize + ?Sized>(data: &T) -> Option<String> {
    swallow(try_to_json_str(data))
}

/// Serialize `data` without `null` members. Returns `None` (and logs) on failure.
pub fn to_json_str_non_null<T: Serialize + ?Sized>(data: &T) -> Option<String> {
    swallow(try_to_json_str_non_null(data))
}

/// Parse `json` into `T`. Returns `None` (and logs) on failure.
pub fn json_to_bean<T: DeserializeOwned>(json: &str) -> Option<T> {
    swallow(try_json_to_bean(json))
}

/// Parse `json` into any deserializable target, typically a collection such
/// as `Vec<User>` or `HashMap<String, Value>`. Returns `None` (and logs) on failure.
pub fn str_to_object<T: DeserializeOwned>(json: &str) -> Option<T> {
    swallow(try_json_to_bean(json))
}

/// Parse `json` into a [`Value`] tree.
pub fn read_tree(json: &str) -> JsonResult<Value> {
    try_json_to_bean(json)
}

/// Convert one serde shape into another through a [`Value`].
pub fn object_to_object<S, T>(object: &S) -> JsonResult<T>
where
    S: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let value = serde_json::to_value(object).map_err(JsonError::Convert)?;
    serde_json::from_value(value).map_err(JsonError::Convert)
}

/// Whether `json` is parseable JSON text.
///
/// The whole input must be one JSON value; trailing tokens such as `{} x`
/// make it invalid.
pub fn is_json_string(json: &str) -> bool {
    read_tree(json).is_ok()
}

/// Pass JSON text through unchanged; serialize anything else.
///
/// If `data` serializes to a string that is itself JSON text, that text is
/// returned as is. Applying this to its own output yields the same string.
pub fn to_json_str_if_not_already<T: Serialize + ?Sized>(data: &T) -> Option<String> {
    if let Ok(Value::String(text)) = serde_json::to_value(data)
        && is_json_string(&text)
    {
        return Some(text);
    }
    to_json_str(data)
}
