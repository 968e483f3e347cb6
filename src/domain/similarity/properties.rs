//! Property checks every similarity strategy must satisfy

use super::SimilarityScorer;
use crate::domain::DomainError;

/// Relative tolerance for comparing scores across strategies
pub(crate) fn approx_eq(a: f32, b: f32) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= 1e-5 * scale
}

pub(crate) fn check_all(scorer: &dyn SimilarityScorer) {
    empty_candidates_yield_empty(scorer);
    self_similarity_is_one(scorer);
    orthogonal_is_zero(scorer);
    opposite_is_minus_one(scorer);
    zero_vector_does_not_divide_by_zero(scorer);
    mismatched_length_is_rejected(scorer);
    preserves_candidate_order(scorer);
}

fn empty_candidates_yield_empty(scorer: &dyn SimilarityScorer) {
    let scores = scorer.score(&[0.3, 0.4], &[]).unwrap();
    assert!(scores.is_empty());
}

fn self_similarity_is_one(scorer: &dyn SimilarityScorer) {
    let query: Vec<f32> = (1..=19).map(|i| i as f32 / 7.0).collect();
    let scores = scorer.score(&query, &[&query]).unwrap();

    assert_eq!(scores.len(), 1);
    assert!(approx_eq(scores[0], 1.0), "self similarity was {}", scores[0]);
}

fn orthogonal_is_zero(scorer: &dyn SimilarityScorer) {
    let scores = scorer.score(&[1.0, 0.0, 0.0], &[&[0.0, 1.0, 0.0]]).unwrap();
    assert!(scores[0].abs() < 1e-6);
}

fn opposite_is_minus_one(scorer: &dyn SimilarityScorer) {
    let scores = scorer.score(&[1.0, 0.0, 0.0], &[&[-1.0, 0.0, 0.0]]).unwrap();
    assert!(approx_eq(scores[0], -1.0));
}

fn zero_vector_does_not_divide_by_zero(scorer: &dyn SimilarityScorer) {
    let scores = scorer.score(&[0.0, 0.0], &[&[1.0, 1.0], &[0.0, 0.0]]).unwrap();

    assert!(scores.iter().all(|s| s.is_finite()));
    assert_eq!(scores[1], 0.0);
}

fn mismatched_length_is_rejected(scorer: &dyn SimilarityScorer) {
    let result = scorer.score(&[1.0, 2.0], &[&[1.0, 2.0], &[1.0, 2.0, 3.0]]);
    assert!(matches!(result, Err(DomainError::InvalidArgument { .. })));
}

fn preserves_candidate_order(scorer: &dyn SimilarityScorer) {
    let query: [f32; 2] = [1.0, 0.0];
    let rows: [&[f32]; 3] = [&[0.0, 1.0], &[1.0, 0.0], &[1.0, 1.0]];

    let scores = scorer.score(&query, &rows).unwrap();

    assert!(scores[0].abs() < 1e-6);
    assert!(approx_eq(scores[1], 1.0));
    assert!(scores[2] > 0.7 && scores[2] < 0.72);
}
