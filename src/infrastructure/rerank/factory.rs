//! Re-ranker selection

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use super::{HttpRelevanceScorer, LexicalOverlapModel, LocalRelevanceScorer};
use crate::config::RerankConfig;
use crate::domain::rerank::{RelevanceScorer, Reranker};
use crate::domain::DomainError;
use crate::infrastructure::http::HttpClient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelevanceScorerType {
    /// Cross-encoder model server
    Http,
    /// Local token overlap
    #[default]
    Lexical,
}

/// Builds the re-ranker; disabled configuration yields the identity
pub fn create_reranker(config: &RerankConfig) -> Result<Reranker, DomainError> {
    if !config.enabled {
        return Ok(Reranker::disabled());
    }

    let scorer: Arc<dyn RelevanceScorer> = match config.provider {
        RelevanceScorerType::Http => {
            let base_url = config.base_url.clone().ok_or_else(|| {
                DomainError::configuration("rerank.base_url is required for the http provider")
            })?;
            let client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;

            Arc::new(HttpRelevanceScorer::new(client, base_url, config.model.clone()))
        }
        RelevanceScorerType::Lexical => {
            Arc::new(LocalRelevanceScorer::new(LexicalOverlapModel::new()))
        }
    };

    tracing::info!(scorer = scorer.scorer_name(), "Re-ranking enabled");

    Ok(Reranker::new(scorer))
}
