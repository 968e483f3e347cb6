//! Search request

use serde::{Deserialize, Serialize};

use crate::domain::item::Metadata;
use crate::domain::DomainError;

pub const DEFAULT_TOP_K: usize = 5;
pub const MIN_TOP_K: usize = 1;
pub const MAX_TOP_K: usize = 100;

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// Similarity search request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default)]
    pub filters: Option<Metadata>,
    #[serde(default)]
    pub text_filter: Option<String>,
    #[serde(default)]
    pub use_hybrid: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: DEFAULT_TOP_K,
            filters: None,
            text_filter: None,
            use_hybrid: false,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_filters(mut self, filters: Metadata) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn with_text_filter(mut self, text_filter: impl Into<String>) -> Self {
        self.text_filter = Some(text_filter.into());
        self
    }

    pub fn with_hybrid(mut self, use_hybrid: bool) -> Self {
        self.use_hybrid = use_hybrid;
        self
    }

    /// Text filter with surrounding whitespace removed, `None` when blank
    pub fn effective_text_filter(&self) -> Option<&str> {
        self.text_filter
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Filters, `None` when empty
    pub fn effective_filters(&self) -> Option<&Metadata> {
        self.filters.as_ref().filter(|f| !f.is_empty())
    }

    /// Hybrid retrieval runs when requested or when a text filter is present
    pub fn wants_hybrid(&self) -> bool {
        self.use_hybrid || self.effective_text_filter().is_some()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.query.trim().is_empty() {
            return Err(DomainError::invalid_argument("query cannot be empty"));
        }

        if !(MIN_TOP_K..=MAX_TOP_K).contains(&self.top_k) {
            return Err(DomainError::invalid_argument(format!(
                "top_k must be between {} and {}, got {}",
                MIN_TOP_K, MAX_TOP_K, self.top_k
            )));
        }

        Ok(())
    }
}
