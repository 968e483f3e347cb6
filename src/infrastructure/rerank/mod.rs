//! Relevance scorer implementations for the re-ranker

mod factory;
mod http;
mod lexical;
mod local;

pub use factory::{create_reranker, RelevanceScorerType};
pub use http::HttpRelevanceScorer;
pub use lexical::LexicalOverlapModel;
pub use local::LocalRelevanceScorer;
