//! In-memory item repository for development and testing

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::item::{
    metadata_contains, validate_embedding_dimension, Item, ItemRepository, Metadata, ScoredItem,
};
use crate::domain::similarity::{default_scorer, SimilarityScorer};
use crate::domain::DomainError;

/// In-memory item repository scoring with a [`SimilarityScorer`]
#[derive(Debug)]
pub struct InMemoryItemRepository {
    dimension: usize,
    items: RwLock<HashMap<Uuid, Item>>,
    scorer: Arc<dyn SimilarityScorer>,
}

impl InMemoryItemRepository {
    pub fn new(dimension: usize) -> Self {
        Self::with_scorer(dimension, default_scorer())
    }

    pub fn with_scorer(dimension: usize, scorer: Arc<dyn SimilarityScorer>) -> Self {
        Self {
            dimension,
            items: RwLock::new(HashMap::new()),
            scorer,
        }
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    async fn search(
        &self,
        embedding: &[f32],
        top_k: usize,
        filters: Option<&Metadata>,
        text_filter: Option<&str>,
    ) -> Result<Vec<ScoredItem>, DomainError> {
        validate_embedding_dimension(self.dimension, embedding)?;

        let needle = text_filter.map(str::to_lowercase);
        let items = self.items.read().await;

        let candidates: Vec<(&Item, &[f32])> = items
            .values()
            .filter(|item| filters.is_none_or(|f| metadata_contains(item.metadata(), f)))
            .filter(|item| {
                needle
                    .as_deref()
                    .is_none_or(|n| item.content().to_lowercase().contains(n))
            })
            .filter_map(|item| item.embedding().map(|e| (item, e)))
            .collect();

        let vectors: Vec<&[f32]> = candidates.iter().map(|(_, e)| *e).collect();
        let scores = self.scorer.score(embedding, &vectors)?;

        let mut results: Vec<ScoredItem> = candidates
            .iter()
            .zip(scores)
            .map(|((item, _), score)| ScoredItem::new(item, score))
            .collect();

        // Ties break on id so repeated searches return the same order
        results.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        results.truncate(top_k);

        Ok(results)
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn upsert(
        &self,
        id: Uuid,
        content: &str,
        metadata: Option<&Metadata>,
        embedding: Option<&[f32]>,
    ) -> Result<Item, DomainError> {
        if let Some(embedding) = embedding {
            validate_embedding_dimension(self.dimension, embedding)?;
        }

        let mut items = self.items.write().await;
        let item = match items.get_mut(&id) {
            Some(existing) => {
                existing.apply_upsert(content, metadata.cloned(), embedding.map(<[f32]>::to_vec));
                existing.clone()
            }
            None => {
                let item = Item::new(id, content)
                    .with_metadata(metadata.cloned())
                    .with_embedding(embedding.map(<[f32]>::to_vec));
                items.insert(id, item.clone());
                item
            }
        };

        Ok(item)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Item>, DomainError> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn set_embedding(&self, id: Uuid, embedding: &[f32]) -> Result<bool, DomainError> {
        validate_embedding_dimension(self.dimension, embedding)?;

        let mut items = self.items.write().await;
        match items.get_mut(&id) {
            Some(item) => {
                item.set_embedding(embedding.to_vec());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn vector_search(
        &self,
        embedding: &[f32],
        top_k: usize,
        filters: Option<&Metadata>,
    ) -> Result<Vec<ScoredItem>, DomainError> {
        self.search(embedding, top_k, filters, None).await
    }

    async fn hybrid_search(
        &self,
        embedding: &[f32],
        top_k: usize,
        filters: Option<&Metadata>,
        text_filter: Option<&str>,
    ) -> Result<Vec<ScoredItem>, DomainError> {
        self.search(embedding, top_k, filters, text_filter).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
