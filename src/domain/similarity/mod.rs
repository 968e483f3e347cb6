//! Similarity scoring - cosine similarity between a query and candidate rows
//!
//! Two interchangeable strategies implement [`SimilarityScorer`]:
//! - [`PortableScorer`]: straightforward scalar loops, always available
//! - `AcceleratedScorer`: lane-chunked accumulation with parallel rows,
//!   compiled in with the `accelerated` feature
//!
//! [`default_scorer`] picks the strategy chosen at build time.

#[cfg(feature = "accelerated")]
mod accelerated;
mod scorer;

#[cfg(feature = "accelerated")]
pub use accelerated::AcceleratedScorer;
pub use scorer::{default_scorer, PortableScorer, SimilarityScorer, NORM_EPSILON};

#[cfg(test)]
pub(crate) mod properties;
