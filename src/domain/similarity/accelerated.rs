//! Accelerated cosine scorer
//!
//! Accumulates in fixed 8-lane chunks so the compiler can vectorise the
//! inner loop, and scores rows in parallel with rayon.

use rayon::prelude::*;

use super::scorer::{ensure_dimensions, SimilarityScorer, NORM_EPSILON};
use crate::domain::DomainError;

const LANES: usize = 8;

/// Rows below this count are scored on the calling thread
const PARALLEL_THRESHOLD: usize = 64;

#[derive(Debug, Clone, Copy, Default)]
pub struct AcceleratedScorer;

impl AcceleratedScorer {
    pub fn new() -> Self {
        Self
    }
}

/// Returns (dot(a, b), |b|^2) in one pass
#[inline]
fn dot_and_norm_sq(a: &[f32], b: &[f32]) -> (f32, f32) {
    let mut dot = [0.0f32; LANES];
    let mut norm = [0.0f32; LANES];

    let a_chunks = a.chunks_exact(LANES);
    let b_chunks = b.chunks_exact(LANES);
    let a_tail = a_chunks.remainder();
    let b_tail = b_chunks.remainder();

    for (ca, cb) in a_chunks.zip(b_chunks) {
        for i in 0..LANES {
            dot[i] += ca[i] * cb[i];
            norm[i] += cb[i] * cb[i];
        }
    }

    let mut dot_sum: f32 = dot.iter().sum();
    let mut norm_sum: f32 = norm.iter().sum();

    for (x, y) in a_tail.iter().zip(b_tail.iter()) {
        dot_sum += x * y;
        norm_sum += y * y;
    }

    (dot_sum, norm_sum)
}

impl SimilarityScorer for AcceleratedScorer {
    fn score(&self, query: &[f32], candidates: &[&[f32]]) -> Result<Vec<f32>, DomainError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        ensure_dimensions(query, candidates)?;

        let (_, query_norm_sq) = dot_and_norm_sq(query, query);
        let query_norm = query_norm_sq.sqrt() + NORM_EPSILON;

        let score_row = |row: &&[f32]| {
            let (dot, norm_sq) = dot_and_norm_sq(query, row);
            dot / (query_norm * (norm_sq.sqrt() + NORM_EPSILON))
        };

        let scores = if candidates.len() >= PARALLEL_THRESHOLD {
            candidates.par_iter().map(score_row).collect()
        } else {
            candidates.iter().map(score_row).collect()
        };

        Ok(scores)
    }

    fn name(&self) -> &'static str {
        "accelerated"
    }
}
