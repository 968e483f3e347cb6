//! Domain layer - Core retrieval logic and entities

pub mod cache;
pub mod embedding;
pub mod error;
pub mod item;
pub mod queue;
pub mod rerank;
pub mod search;
pub mod similarity;

pub use cache::{Cache, CacheExt};
pub use embedding::{EmbeddingModel, EmbeddingProvider};
pub use error::{DomainError, SoftOutcome};
pub use item::{Item, ItemCreate, ItemRead, ItemRepository, Metadata, ScoredItem};
pub use queue::{EmbeddingJob, WorkQueue};
pub use rerank::{RelevanceModel, RelevanceScorer, Reranker};
pub use search::{CacheNamespace, SearchRequest, SearchResponse, SearchResult};
pub use similarity::{default_scorer, SimilarityScorer};
