//! Search cache key construction

use serde_json::Value;

use super::SearchRequest;
use crate::domain::cache::{canonical_json, CacheKeyParams};
use crate::domain::item::Metadata;

pub const SEARCH_KEY_PREFIX: &str = "search";

fn normalize_text(text: Option<&str>) -> String {
    text.map(|t| t.trim().to_lowercase()).unwrap_or_default()
}

/// Builds the cache key for a search under a namespace
///
/// Query and text filter are trimmed and lower-cased; filters are
/// serialised with sorted keys, so missing and empty filters coincide.
pub fn build_search_cache_key(
    namespace: &str,
    query: &str,
    top_k: usize,
    filters: Option<&Metadata>,
    text_filter: Option<&str>,
) -> String {
    let filters = filters
        .map(|f| canonical_json(&Value::Object(f.clone())))
        .unwrap_or_else(|| "{}".to_string());

    CacheKeyParams::new(SEARCH_KEY_PREFIX)
        .with_part(namespace)
        .with_part(normalize_text(Some(query)))
        .with_part(top_k.to_string())
        .with_part(filters)
        .with_part(normalize_text(text_filter))
        .digest()
}

impl SearchRequest {
    /// Cache key of this request under `namespace`
    pub fn cache_key(&self, namespace: &str) -> String {
        build_search_cache_key(
            namespace,
            &self.query,
            self.top_k,
            self.filters.as_ref(),
            self.text_filter.as_deref(),
        )
    }
}
