//! In-process relevance scorer

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::rerank::{RelevanceModel, RelevanceScorer};
use crate::domain::DomainError;

/// Runs a synchronous [`RelevanceModel`] on the blocking thread pool
#[derive(Debug)]
pub struct LocalRelevanceScorer<M: RelevanceModel> {
    model: Arc<M>,
}

impl<M: RelevanceModel> LocalRelevanceScorer<M> {
    pub fn new(model: M) -> Self {
        Self {
            model: Arc::new(model),
        }
    }
}

#[async_trait]
impl<M: RelevanceModel> RelevanceScorer for LocalRelevanceScorer<M> {
    async fn score(&self, query: &str, candidates: Vec<String>) -> Result<Vec<f32>, DomainError> {
        let model = Arc::clone(&self.model);
        let query = query.to_string();

        tokio::task::spawn_blocking(move || {
            candidates
                .iter()
                .map(|candidate| model.score(&query, candidate))
                .collect::<Vec<f32>>()
        })
        .await
        .map_err(|e| DomainError::internal(format!("Relevance task failed: {}", e)))
    }

    fn scorer_name(&self) -> &'static str {
        self.model.name()
    }
}
