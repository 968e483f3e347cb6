//! Re-rank domain - second-pass relevance scoring

mod reranker;
mod scorer;

pub use reranker::Reranker;
pub use scorer::{RelevanceModel, RelevanceScorer};

#[cfg(test)]
pub use scorer::mock::MockRelevanceScorer;
