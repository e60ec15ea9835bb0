//! Helpers for reading loosely-typed JSON.
//!
//! A field is *present* when the key exists and its value is not `null`.
//! `false` and `0` are present values.

use serde_json::{Map, Value};

/// The value under `key`, unless it is missing or `null`.
pub fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

/// Float view of a number or numeric string.
///
/// Strings that do not parse to a finite number (`"abc"`, `"NaN"`,
/// `"1e999"`) read as `0.0`. Other JSON types have no float view.
pub fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(
            s.trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .unwrap_or(0.0),
        ),
        _ => None,
    }
}

/// Integer view of a number or numeric string. Fractions are truncated.
pub fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            Some(
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
                    .unwrap_or(0),
            )
        }
        _ => None,
    }
}

/// Float field accessor; `None` when absent or not numeric.
pub fn float_field(map: &Map<String, Value>, key: &str) -> Option<f64> {
    present(map, key).and_then(as_float)
}

/// Integer field accessor; `None` when absent or not numeric.
pub fn int_field(map: &Map<String, Value>, key: &str) -> Option<i64> {
    present(map, key).and_then(as_int)
}

/// String field accessor; `None` when absent or not a string.
pub fn str_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    present(map, key).and_then(Value::as_str)
}

/// Array field accessor; absent or non-array values read as empty.
pub fn array_field<'a>(map: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    present(map, key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
