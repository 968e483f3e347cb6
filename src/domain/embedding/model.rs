//! Synchronous embedding model seam

use std::fmt::Debug;

use crate::domain::similarity::NORM_EPSILON;
use crate::domain::DomainError;

/// A CPU-bound model that encodes a batch of texts
///
/// Implementations may block; callers run them off the async executor.
pub trait EmbeddingModel: Send + Sync + Debug + 'static {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError>;

    /// Output vector length
    fn dimensions(&self) -> usize;

    fn name(&self) -> &'static str;
}

/// Scales a vector to unit length in place; zero vectors stay zero
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();

    if norm > NORM_EPSILON {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_normalize() {
        let mut vector = vec![3.0, 4.0];
        l2_normalize(&mut vector);

        assert!((vector[0] - 0.6).abs() < 1e-6);
        assert!((vector[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_l2_normalize_zero_vector() {
        let mut vector = vec![0.0; 3];
        l2_normalize(&mut vector);

        assert_eq!(vector, vec![0.0; 3]);
    }
}
