//! Metadata containment matching
//!
//! Mirrors Postgres `jsonb @>`: objects match key by key recursively,
//! arrays match when every needle element is contained in some haystack
//! element, scalars must be equal. Numbers compare by value.

use serde_json::Value;

use super::Metadata;

/// Whether `metadata` contains every key/value pair of `filters`
///
/// Missing metadata only matches an empty filter.
pub fn metadata_contains(metadata: Option<&Metadata>, filters: &Metadata) -> bool {
    if filters.is_empty() {
        return true;
    }

    match metadata {
        Some(metadata) => filters.iter().all(|(key, expected)| {
            metadata
                .get(key)
                .map(|actual| value_contains(actual, expected))
                .unwrap_or(false)
        }),
        None => false,
    }
}

fn value_contains(haystack: &Value, needle: &Value) -> bool {
    match (haystack, needle) {
        (Value::Object(h), Value::Object(n)) => n.iter().all(|(key, expected)| {
            h.get(key)
                .map(|actual| value_contains(actual, expected))
                .unwrap_or(false)
        }),
        (Value::Array(h), Value::Array(n)) => n
            .iter()
            .all(|expected| h.iter().any(|actual| value_contains(actual, expected))),
        (Value::Number(h), Value::Number(n)) => match (h.as_f64(), n.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => h == n,
        },
        (h, n) => h == n,
    }
}
