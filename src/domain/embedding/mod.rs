//! Embedding domain - text to fixed-length vector seams

mod model;
mod provider;

pub use model::{l2_normalize, EmbeddingModel};
pub use provider::EmbeddingProvider;

#[cfg(test)]
pub use provider::mock::MockEmbeddingProvider;
