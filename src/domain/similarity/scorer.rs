//! Similarity scorer trait and the portable implementation

use std::fmt::Debug;
use std::sync::Arc;

use crate::domain::DomainError;

/// Added to both norms so zero vectors never divide by zero
pub const NORM_EPSILON: f32 = 1e-8;

/// Strategy for scoring candidate vectors against a query vector
pub trait SimilarityScorer: Send + Sync + Debug {
    /// Cosine similarity of `query` against every row of `candidates`
    ///
    /// Returns one score per candidate, in candidate order. An empty
    /// candidate list yields an empty result. Every row must have the
    /// query's length.
    fn score(&self, query: &[f32], candidates: &[&[f32]]) -> Result<Vec<f32>, DomainError>;

    /// Name of the strategy, for logging
    fn name(&self) -> &'static str;
}

/// Scalar f32 implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct PortableScorer;

impl PortableScorer {
    pub fn new() -> Self {
        Self
    }
}

impl SimilarityScorer for PortableScorer {
    fn score(&self, query: &[f32], candidates: &[&[f32]]) -> Result<Vec<f32>, DomainError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        ensure_dimensions(query, candidates)?;

        let query_norm = query.iter().map(|x| x * x).sum::<f32>().sqrt() + NORM_EPSILON;

        let scores = candidates
            .iter()
            .map(|row| {
                let mut dot = 0.0f32;
                let mut norm_sq = 0.0f32;

                for (q, r) in query.iter().zip(row.iter()) {
                    dot += q * r;
                    norm_sq += r * r;
                }

                dot / (query_norm * (norm_sq.sqrt() + NORM_EPSILON))
            })
            .collect();

        Ok(scores)
    }

    fn name(&self) -> &'static str {
        "portable"
    }
}

/// Rejects candidate rows whose length differs from the query
pub(crate) fn ensure_dimensions(query: &[f32], candidates: &[&[f32]]) -> Result<(), DomainError> {
    if let Some((idx, row)) = candidates
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != query.len())
    {
        return Err(DomainError::invalid_argument(format!(
            "Candidate {} has {} dimensions, query has {}",
            idx,
            row.len(),
            query.len()
        )));
    }

    Ok(())
}

/// Returns the scorer selected at build time
pub fn default_scorer() -> Arc<dyn SimilarityScorer> {
    #[cfg(feature = "accelerated")]
    {
        Arc::new(super::AcceleratedScorer::new())
    }

    #[cfg(not(feature = "accelerated"))]
    {
        Arc::new(PortableScorer::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::similarity::properties;

    #[test]
    fn test_portable_scorer_properties() {
        properties::check_all(&PortableScorer::new());
    }

    #[test]
    fn test_portable_scorer_known_values() {
        let scorer = PortableScorer::new();
        let query: [f32; 2] = [1.0, 0.0];
        let diagonal: [f32; 2] = [0.707, 0.707];

        let scores = scorer.score(&query, &[&diagonal]).unwrap();

        assert!(scores[0] > 0.7 && scores[0] < 0.72);
    }

    #[test]
    fn test_default_scorer_is_usable() {
        let scorer = default_scorer();
        let scores = scorer.score(&[1.0, 2.0], &[&[1.0, 2.0]]).unwrap();

        assert_eq!(scores.len(), 1);
        assert!(!scorer.name().is_empty());
    }
}
