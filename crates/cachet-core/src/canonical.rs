//! Canonical JSON encoding for deterministic serialization.
//!
//! Document hashes are computed over serialized bytes, so the same logical
//! value must produce identical bytes on every platform. This module makes
//! the ordering contract explicit instead of relying on map iteration
//! order:
//!
//! - Object keys are sorted lexicographically by UTF-8 byte order
//! - No insignificant whitespace
//! - Strings are escaped per RFC 8259; numbers use serde_json's stable
//!   formatting

use serde_json::{Map, Value};

/// Encode a value to canonical JSON bytes.
pub fn to_bytes(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    write_value(&mut out, value);
    out
}

/// Encode a value to a canonical JSON string.
pub fn to_string(value: &Value) -> String {
    String::from_utf8(to_bytes(value)).expect("canonical JSON is valid utf-8")
}

/// Parse JSON bytes back into a value.
///
/// Parsing accepts any valid JSON; only encoding is canonicalized.
pub fn from_slice(bytes: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(bytes)
}

fn write_value(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => out.extend_from_slice(n.to_string().as_bytes()),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(out, item);
            }
            out.push(b']');
        }
        Value::Object(map) => write_object(out, map),
    }
}

fn write_object(out: &mut Vec<u8>, map: &Map<String, Value>) {
    // str ordering is byte ordering, which for UTF-8 matches code points.
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort_unstable();

    out.push(b'{');
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            out.push(b',');
        }
        write_string(out, key);
        out.push(b':');
        write_value(out, &map[key.as_str()]);
    }
    out.push(b'}');
}

fn write_string(out: &mut Vec<u8>, s: &str) {
    let escaped = serde_json::to_vec(s).expect("string serialization is infallible");
    out.extend_from_slice(&escaped);
}
