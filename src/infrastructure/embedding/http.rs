//! OpenAI-compatible embedding server provider

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::embedding::{l2_normalize, EmbeddingProvider};
use crate::domain::DomainError;
use crate::infrastructure::http::HttpClientTrait;

const PROVIDER_NAME: &str = "http-embeddings";

/// Embedding provider speaking the `/v1/embeddings` wire format
#[derive(Debug)]
pub struct HttpEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
    model: String,
    auth_header: Option<String>,
    dimensions: usize,
    batch_size: usize,
}

impl<C: HttpClientTrait> HttpEmbeddingProvider<C> {
    pub fn new(
        client: C,
        base_url: impl Into<String>,
        model: impl Into<String>,
        dimensions: usize,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            auth_header: None,
            dimensions,
            batch_size: 32,
        }
    }

    pub fn with_api_key(mut self, api_key: impl AsRef<str>) -> Self {
        self.auth_header = Some(format!("Bearer {}", api_key.as_ref()));
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];
        if let Some(ref auth) = self.auth_header {
            headers.push(("Authorization", auth.as_str()));
        }
        headers
    }

    fn parse_response(
        &self,
        json: serde_json::Value,
        expected: usize,
    ) -> Result<Vec<Vec<f32>>, DomainError> {
        let mut response: WireEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider(
                PROVIDER_NAME,
                format!("Failed to parse embedding response: {}", e),
            )
        })?;

        if response.data.len() != expected {
            return Err(DomainError::provider(
                PROVIDER_NAME,
                format!(
                    "Expected {} embeddings, got {}",
                    expected,
                    response.data.len()
                ),
            ));
        }

        response.data.sort_by_key(|d| d.index);

        response
            .data
            .into_iter()
            .map(|d| {
                if d.embedding.len() != self.dimensions {
                    return Err(DomainError::provider(
                        PROVIDER_NAME,
                        format!(
                            "Expected {} dimensions, got {}",
                            self.dimensions,
                            d.embedding.len()
                        ),
                    ));
                }

                let mut vector = d.embedding;
                l2_normalize(&mut vector);
                Ok(vector)
            })
            .collect()
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for HttpEmbeddingProvider<C> {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError> {
        let url = self.embeddings_url();
        let mut vectors = Vec::with_capacity(texts.len());

        for batch in texts.chunks(self.batch_size) {
            let body = serde_json::json!({
                "model": self.model,
                "input": batch,
            });

            let response = self.client.post_json(&url, self.headers(), &body).await?;
            vectors.extend(self.parse_response(response, batch.len())?);
        }

        tracing::debug!(count = vectors.len(), model = %self.model, "Embedded texts");

        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

#[derive(Debug, Deserialize)]
struct WireEmbeddingResponse {
    data: Vec<WireEmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct WireEmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}
