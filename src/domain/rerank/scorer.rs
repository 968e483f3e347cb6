//! Relevance scorer seams

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Cross-encoder style scorer: one relevance score per candidate text
#[async_trait]
pub trait RelevanceScorer: Send + Sync + Debug {
    async fn score(&self, query: &str, candidates: Vec<String>) -> Result<Vec<f32>, DomainError>;

    fn scorer_name(&self) -> &'static str;
}

/// Synchronous, CPU-bound relevance model
pub trait RelevanceModel: Send + Sync + Debug + 'static {
    fn score(&self, query: &str, candidate: &str) -> f32;

    fn name(&self) -> &'static str;
}
