//! Embedding provider implementations

mod factory;
mod hashing;
mod http;
mod local;

pub use factory::{create_embedding_provider, EmbeddingProviderType};
pub use hashing::HashingEmbeddingModel;
pub use http::HttpEmbeddingProvider;
pub use local::LocalEmbeddingProvider;
