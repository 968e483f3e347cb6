//! Embedding provider selection

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use super::{HashingEmbeddingModel, HttpEmbeddingProvider, LocalEmbeddingProvider};
use crate::config::EmbeddingConfig;
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::DomainError;
use crate::infrastructure::http::HttpClient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderType {
    /// OpenAI-compatible model server
    Http,
    /// Local feature hashing
    #[default]
    Hashing,
}

/// Builds the configured provider producing `dimensions`-long vectors
pub fn create_embedding_provider(
    config: &EmbeddingConfig,
    dimensions: usize,
) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    match config.provider {
        EmbeddingProviderType::Http => {
            let base_url = config.base_url.clone().ok_or_else(|| {
                DomainError::configuration("embedding.base_url is required for the http provider")
            })?;

            let client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;
            let mut provider =
                HttpEmbeddingProvider::new(client, base_url, config.model.clone(), dimensions)
                    .with_batch_size(config.batch_size);

            if let Some(ref api_key) = config.api_key {
                provider = provider.with_api_key(api_key);
            }

            tracing::info!(model = %config.model, dimensions, "Using HTTP embedding provider");
            Ok(Arc::new(provider))
        }
        EmbeddingProviderType::Hashing => {
            let model = HashingEmbeddingModel::new(dimensions)?;

            tracing::info!(dimensions, "Using hashing embedding model");
            Ok(Arc::new(LocalEmbeddingProvider::new(model, config.batch_size)))
        }
    }
}
