//! Cache key construction
//!
//! Keys are `"{prefix}:{sha256 hex}"` over the ordered parts joined with
//! [`KEY_SEPARATOR`]. Callers are responsible for normalising the parts.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// ASCII unit separator; never produced by normalised query text or JSON
pub const KEY_SEPARATOR: char = '\u{1f}';

/// Ordered components hashed into a cache key
#[derive(Debug, Clone, Default)]
pub struct CacheKeyParams {
    prefix: String,
    parts: Vec<String>,
}

impl CacheKeyParams {
    /// Creates key parameters under the given prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            parts: Vec::new(),
        }
    }

    /// Appends a component; order is significant
    pub fn with_part(mut self, part: impl Into<String>) -> Self {
        self.parts.push(part.into());
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Hashes the parts and returns the prefixed hex digest
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();

        for (idx, part) in self.parts.iter().enumerate() {
            if idx > 0 {
                let mut buf = [0u8; 4];
                hasher.update(KEY_SEPARATOR.encode_utf8(&mut buf).as_bytes());
            }
            hasher.update(part.as_bytes());
        }

        format!("{}:{}", self.prefix, hex::encode(hasher.finalize()))
    }
}

/// Serialises a JSON value with object keys sorted at every depth
///
/// Independent of whether `serde_json` preserves insertion order, so two
/// maps holding the same pairs always produce the same string.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (idx, (key, val)) in entries.into_iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(val, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
