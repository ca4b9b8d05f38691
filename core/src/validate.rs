//! Response decoding and base success response checks.
//!
//! # Design
//! The typed decode and the map decode both read the same raw bytes and
//! either one failing fails the call. Expected and actual values are
//! compared by their rendered text, not structurally: `1`, `1.0` and `"1"`
//! all match each other. This is deliberate and callers relying on typed
//! equality should check the decoded response themselves.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{CallError, DecodeTarget};

/// Decodes `body` into the caller's declared response type.
pub fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R, CallError> {
    serde_json::from_slice(body).map_err(|source| CallError::Decode {
        target: DecodeTarget::Response,
        source,
    })
}

/// Decodes `body` into a field map. A JSON `null` body yields an empty map.
pub fn decode_map(body: &[u8]) -> Result<Map<String, Value>, CallError> {
    let decoded: Option<Map<String, Value>> =
        serde_json::from_slice(body).map_err(|source| CallError::Decode {
            target: DecodeTarget::ResponseMap,
            source,
        })?;
    Ok(decoded.unwrap_or_default())
}

/// Checks every expected key against `body`, stopping at the first key (in
/// sorted order) that is missing or renders differently.
///
/// Does nothing, and does not decode, when `expected` is empty.
pub fn check_base_success(expected: &BTreeMap<String, Value>, body: &[u8]) -> Result<(), CallError> {
    if expected.is_empty() {
        return Ok(());
    }

    let actual = decode_map(body)?;
    for (key, want) in expected {
        let want = render(want);
        match actual.get(key).map(render) {
            Some(got) if got == want => {
                tracing::trace!(%key, value = %got, "base success response key matched");
            }
            got => {
                return Err(CallError::Validation {
                    key: key.clone(),
                    expected: want,
                    actual: got,
                });
            }
        }
    }
    Ok(())
}

/// Text form used for value comparison.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => format!("{}", f as i64),
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
