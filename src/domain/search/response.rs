//! Search response

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::item::{Metadata, ScoredItem};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: Uuid,
    pub content: String,
    pub metadata: Option<Metadata>,
    pub score: f32,
}

impl From<ScoredItem> for SearchResult {
    fn from(scored: ScoredItem) -> Self {
        Self {
            id: scored.id,
            content: scored.content,
            metadata: scored.metadata,
            score: scored.score,
        }
    }
}

/// Results ordered by descending score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl From<Vec<ScoredItem>> for SearchResponse {
    fn from(items: Vec<ScoredItem>) -> Self {
        Self::new(items.into_iter().map(SearchResult::from).collect())
    }
}
