//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for embedding providers (model servers, local models)
///
/// Returned vectors are unit length and `dimensions()` long, one per input
/// text in input order.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Generate embeddings for a batch of texts
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError>;

    /// Embedding dimensions produced by this provider
    fn dimensions(&self) -> usize;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Embed a single text
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        self.embed(vec![text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider(self.provider_name(), "Empty embedding response"))
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::embedding::l2_normalize;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        name: &'static str,
        dimensions: usize,
        error: Option<String>,
        calls: AtomicUsize,
    }

    impl MockEmbeddingProvider {
        pub fn new(name: &'static str, dimensions: usize) -> Self {
            Self {
                name,
                dimensions,
                error: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(ref error) = self.error {
                return Err(DomainError::provider(self.name, error));
            }

            Ok(texts
                .iter()
                .map(|text| {
                    // Deterministic vector derived from the text bytes
                    let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_add(b as u64));
                    let mut vector: Vec<f32> = (0..self.dimensions)
                        .map(|i| ((hash.wrapping_add(i as u64) % 1000) as f32 / 1000.0) - 0.5)
                        .collect();
                    l2_normalize(&mut vector);
                    vector
                })
                .collect())
        }

        fn dimensions(&self) -> usize {
            self.dimensions
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_provider_batch_input() {
            let provider = MockEmbeddingProvider::new("test", 16);

            let vectors = provider
                .embed(vec!["Hello".into(), "World".into()])
                .await
                .unwrap();

            assert_eq!(vectors.len(), 2);
            assert_eq!(vectors[0].len(), 16);
            assert_eq!(provider.calls(), 1);
        }

        #[tokio::test]
        async fn test_embed_one_is_deterministic() {
            let provider = MockEmbeddingProvider::new("test", 8);

            let a = provider.embed_one("Hello").await.unwrap();
            let b = provider.embed_one("Hello").await.unwrap();

            assert_eq!(a, b);
        }

        #[tokio::test]
        async fn test_mock_provider_error() {
            let provider = MockEmbeddingProvider::new("test", 8).with_error("API error");

            let result = provider.embed_one("Hello").await;

            assert!(matches!(result, Err(DomainError::Provider { .. })));
        }
    }
}
