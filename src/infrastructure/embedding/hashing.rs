//! Feature-hashing embedding model
//!
//! Deterministic and dependency-free at runtime: each lower-cased word is
//! hashed with SHA-256 into one of `dimensions` buckets with a signed
//! weight. Texts sharing words land close together, which is enough for
//! development and tests without a model server.

use sha2::{Digest, Sha256};
use unicode_segmentation::UnicodeSegmentation;

use crate::domain::embedding::EmbeddingModel;
use crate::domain::DomainError;

#[derive(Debug, Clone)]
pub struct HashingEmbeddingModel {
    dimensions: usize,
}

impl HashingEmbeddingModel {
    pub fn new(dimensions: usize) -> Result<Self, DomainError> {
        if dimensions == 0 {
            return Err(DomainError::configuration(
                "Embedding dimensions must be positive",
            ));
        }

        Ok(Self { dimensions })
    }

    fn encode_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        for word in text.unicode_words() {
            let digest = Sha256::digest(word.to_lowercase().as_bytes());

            let mut bucket_bytes = [0u8; 8];
            bucket_bytes.copy_from_slice(&digest[..8]);
            let bucket = (u64::from_le_bytes(bucket_bytes) % self.dimensions as u64) as usize;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };

            vector[bucket] += sign;
        }

        vector
    }
}

impl EmbeddingModel for HashingEmbeddingModel {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        Ok(texts.iter().map(|t| self.encode_one(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &'static str {
        "hashing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::similarity::{PortableScorer, SimilarityScorer};

    fn encode(model: &HashingEmbeddingModel, text: &str) -> Vec<f32> {
        model.encode(&[text.to_string()]).unwrap().remove(0)
    }

    #[test]
    fn test_deterministic_and_case_insensitive() {
        let model = HashingEmbeddingModel::new(64).unwrap();

        assert_eq!(encode(&model, "Hello World"), encode(&model, "hello world"));
        assert_eq!(encode(&model, "hello").len(), 64);
    }

    #[test]
    fn test_shared_words_are_closer() {
        let model = HashingEmbeddingModel::new(256).unwrap();
        let query = encode(&model, "rust async runtime");
        let near = encode(&model, "an async runtime for rust");
        let far = encode(&model, "banana bread recipe");

        let scores = PortableScorer
            .score(&query, &[near.as_slice(), far.as_slice()])
            .unwrap();

        assert!(scores[0] > scores[1]);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(HashingEmbeddingModel::new(0).is_err());
    }
}
