//! Item repository trait definition

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Item, Metadata};
use crate::domain::DomainError;

/// A retrieval candidate with its similarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub id: Uuid,
    pub content: String,
    pub metadata: Option<Metadata>,
    pub score: f32,
}

impl ScoredItem {
    pub fn new(item: &Item, score: f32) -> Self {
        Self {
            id: item.id(),
            content: item.content().to_string(),
            metadata: item.metadata().cloned(),
            score,
        }
    }
}

/// Storage seam for items and similarity retrieval
///
/// Only items with an embedding take part in searches. Results are ordered
/// by cosine distance ascending (score `1 - distance` descending) and capped
/// at `top_k`. A query embedding whose length differs from
/// [`ItemRepository::dimension`] fails with `InvalidArgument`; backend
/// failures surface as `StorageUnavailable`.
#[async_trait]
pub trait ItemRepository: Send + Sync + Debug {
    /// Configured embedding dimension for the whole store
    fn dimension(&self) -> usize;

    /// Inserts or replaces an item keyed by id
    ///
    /// When the row exists and `embedding` is `None`, its previous embedding
    /// is kept.
    async fn upsert(
        &self,
        id: Uuid,
        content: &str,
        metadata: Option<&Metadata>,
        embedding: Option<&[f32]>,
    ) -> Result<Item, DomainError>;

    /// Gets an item by id
    async fn get(&self, id: Uuid) -> Result<Option<Item>, DomainError>;

    /// Overwrites the embedding of the latest row; `false` when the row is gone
    async fn set_embedding(&self, id: Uuid, embedding: &[f32]) -> Result<bool, DomainError>;

    /// Nearest neighbours, restricted to metadata containing `filters` when given
    async fn vector_search(
        &self,
        embedding: &[f32],
        top_k: usize,
        filters: Option<&Metadata>,
    ) -> Result<Vec<ScoredItem>, DomainError>;

    /// Nearest neighbours with metadata containment and a case-insensitive
    /// content substring applied as pre-filters
    async fn hybrid_search(
        &self,
        embedding: &[f32],
        top_k: usize,
        filters: Option<&Metadata>,
        text_filter: Option<&str>,
    ) -> Result<Vec<ScoredItem>, DomainError>;

    /// Round-trips to the backend
    async fn ping(&self) -> Result<(), DomainError>;
}
