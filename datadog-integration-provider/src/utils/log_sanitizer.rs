//! Log sanitization utilities
//!
//! Keeps service-account private keys, API keys and long response bodies
//! out of debug/error logs.

use serde_json::{Map, Value};

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Placeholder written in place of sensitive values.
pub const REDACTED: &str = "<redacted>";

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise returns the first `TRUNCATE_LIMIT` characters with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Masks a secret, keeping only its last four characters.
///
/// Secrets of eight characters or fewer are fully redacted.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 8 {
        return REDACTED.to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{tail}")
}

/// Returns a copy of `attributes` with every key in `sensitive` replaced by [`REDACTED`].
pub fn redact_attributes(attributes: &Map<String, Value>, sensitive: &[&str]) -> Value {
    let redacted = attributes
        .iter()
        .map(|(k, v)| {
            let v = if sensitive.contains(&k.as_str()) && !v.is_null() {
                Value::String(REDACTED.to_string())
            } else {
                v.clone()
            };
            (k.clone(), v)
        })
        .collect();
    Value::Object(redacted)
}
