//! In-process embedding provider

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::embedding::{l2_normalize, EmbeddingModel, EmbeddingProvider};
use crate::domain::DomainError;

/// Runs a synchronous [`EmbeddingModel`] on the blocking thread pool
///
/// Texts are encoded `batch_size` at a time and normalised to unit length.
#[derive(Debug)]
pub struct LocalEmbeddingProvider<M: EmbeddingModel> {
    model: Arc<M>,
    batch_size: usize,
}

impl<M: EmbeddingModel> LocalEmbeddingProvider<M> {
    pub fn new(model: M, batch_size: usize) -> Self {
        Self {
            model: Arc::new(model),
            batch_size: batch_size.max(1),
        }
    }
}

#[async_trait]
impl<M: EmbeddingModel> EmbeddingProvider for LocalEmbeddingProvider<M> {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError> {
        let mut vectors = Vec::with_capacity(texts.len());

        for batch in texts.chunks(self.batch_size) {
            let model = Arc::clone(&self.model);
            let batch = batch.to_vec();
            let expected = batch.len();

            let encoded = tokio::task::spawn_blocking(move || model.encode(&batch))
                .await
                .map_err(|e| DomainError::internal(format!("Embedding task failed: {}", e)))??;

            if encoded.len() != expected {
                return Err(DomainError::provider(
                    self.model.name(),
                    format!("Expected {} embeddings, got {}", expected, encoded.len()),
                ));
            }

            for mut vector in encoded {
                l2_normalize(&mut vector);
                vectors.push(vector);
            }
        }

        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.model.dimensions()
    }

    fn provider_name(&self) -> &'static str {
        self.model.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Emits [3, 4] per text and counts encode calls
    #[derive(Debug, Default)]
    struct CountingModel {
        calls: AtomicUsize,
    }

    impl EmbeddingModel for CountingModel {
        fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts.iter().map(|_| vec![3.0, 4.0]).collect())
        }

        fn dimensions(&self) -> usize {
            2
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    #[tokio::test]
    async fn test_batches_and_normalizes() {
        let provider = LocalEmbeddingProvider::new(CountingModel::default(), 2);

        let vectors = provider
            .embed((0..5).map(|i| i.to_string()).collect())
            .await
            .unwrap();

        assert_eq!(vectors.len(), 5);
        assert_eq!(provider.model.calls.load(Ordering::SeqCst), 3);
        assert!((vectors[0][0] - 0.6).abs() < 1e-6);
        assert!((vectors[0][1] - 0.8).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let provider = LocalEmbeddingProvider::new(CountingModel::default(), 4);

        let vectors = provider.embed(Vec::new()).await.unwrap();

        assert!(vectors.is_empty());
        assert_eq!(provider.model.calls.load(Ordering::SeqCst), 0);
    }
}
