//! Item service - upserts with synchronous or deferred embedding

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::domain::item::{validate_content, validate_embedding_dimension};
use crate::domain::queue::{EmbeddingJob, WorkQueue};
use crate::domain::{
    CacheNamespace, DomainError, EmbeddingProvider, ItemCreate, ItemRead, ItemRepository,
    SoftOutcome,
};
use crate::infrastructure::observability::record_namespace_bump;

/// Trait for item operations
#[async_trait]
pub trait ItemServiceTrait: Send + Sync + Debug {
    /// Inserts or replaces an item, then invalidates cached searches
    async fn upsert(&self, create: ItemCreate) -> Result<ItemRead, DomainError>;

    async fn get(&self, id: Uuid) -> Result<ItemRead, DomainError>;
}

#[derive(Debug)]
pub struct ItemService {
    items: Arc<dyn ItemRepository>,
    embedder: Arc<dyn EmbeddingProvider>,
    queue: Arc<dyn WorkQueue>,
    namespace: CacheNamespace,
}

impl ItemService {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        embedder: Arc<dyn EmbeddingProvider>,
        queue: Arc<dyn WorkQueue>,
        namespace: CacheNamespace,
    ) -> Self {
        Self {
            items,
            embedder,
            queue,
            namespace,
        }
    }
}

#[async_trait]
impl ItemServiceTrait for ItemService {
    async fn upsert(&self, create: ItemCreate) -> Result<ItemRead, DomainError> {
        validate_content(&create.content)?;

        let ItemCreate {
            id,
            content,
            metadata,
            async_embedding,
        } = create;
        let id = id.unwrap_or_else(Uuid::new_v4);

        let item = if async_embedding {
            let item = self
                .items
                .upsert(id, &content, metadata.as_ref(), None)
                .await?;

            SoftOutcome::from_result(
                "embedding_job_enqueue",
                self.queue
                    .enqueue(EmbeddingJob::new(id, content, metadata))
                    .await,
            );

            item
        } else {
            let embedding = self.embedder.embed_one(&content).await?;
            validate_embedding_dimension(self.items.dimension(), &embedding)?;

            self.items
                .upsert(id, &content, metadata.as_ref(), Some(&embedding))
                .await?
        };

        if self.namespace.bump_soft().await.is_done() {
            record_namespace_bump();
        }

        info!(
            item_id = %id,
            async_embedding,
            has_embedding = item.has_embedding(),
            "Item upserted"
        );

        Ok(ItemRead::from(item))
    }

    async fn get(&self, id: Uuid) -> Result<ItemRead, DomainError> {
        self.items
            .get(id)
            .await?
            .map(ItemRead::from)
            .ok_or_else(|| DomainError::not_found(format!("Item '{}' not found", id)))
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Stores upserts in a map without embedding anything
    #[derive(Debug, Default)]
    pub struct MockItemService {
        items: Mutex<HashMap<Uuid, ItemRead>>,
    }

    impl MockItemService {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl ItemServiceTrait for MockItemService {
        async fn upsert(&self, create: ItemCreate) -> Result<ItemRead, DomainError> {
            validate_content(&create.content)?;

            let read = ItemRead {
                id: create.id.unwrap_or_else(Uuid::new_v4),
                content: create.content,
                metadata: create.metadata,
                has_embedding: !create.async_embedding,
            };
            self.items.lock().unwrap().insert(read.id, read.clone());
            Ok(read)
        }

        async fn get(&self, id: Uuid) -> Result<ItemRead, DomainError> {
            self.items
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| DomainError::not_found(format!("Item '{}' not found", id)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCache;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::queue::MockWorkQueue;
    use crate::domain::search::NAMESPACE_KEY;
    use crate::infrastructure::item::InMemoryItemRepository;
    use serde_json::json;

    struct Fixture {
        items: Arc<InMemoryItemRepository>,
        queue: Arc<MockWorkQueue>,
        cache: Arc<MockCache>,
    }

    impl Fixture {
        fn new(queue: MockWorkQueue) -> Self {
            Self {
                items: Arc::new(InMemoryItemRepository::new(4)),
                queue: Arc::new(queue),
                cache: Arc::new(MockCache::new()),
            }
        }

        fn service(&self, embedder: MockEmbeddingProvider) -> ItemService {
            ItemService::new(
                self.items.clone(),
                Arc::new(embedder),
                self.queue.clone(),
                CacheNamespace::new(self.cache.clone()),
            )
        }
    }

    #[tokio::test]
    async fn test_sync_upsert_embeds_inline() {
        let f = Fixture::new(MockWorkQueue::new());
        let service = f.service(MockEmbeddingProvider::new("mock", 4));
        let metadata = json!({"source": "unit"}).as_object().cloned().unwrap();

        let read = service
            .upsert(ItemCreate::new("hello world").with_metadata(metadata.clone()))
            .await
            .unwrap();

        assert!(read.has_embedding);
        assert_eq!(read.metadata, Some(metadata));
        assert_eq!(f.queue.len(), 0);
        assert_eq!(f.cache.raw(NAMESPACE_KEY), Some("1".to_string()));
    }

    #[tokio::test]
    async fn test_async_upsert_enqueues_job() {
        let f = Fixture::new(MockWorkQueue::new());
        let embedder = MockEmbeddingProvider::new("mock", 4);
        let service = f.service(embedder);
        let id = Uuid::new_v4();

        let read = service
            .upsert(
                ItemCreate::new("later")
                    .with_id(id)
                    .with_async_embedding(true),
            )
            .await
            .unwrap();

        assert_eq!(read.id, id);
        assert!(!read.has_embedding);
        let jobs = f.queue.jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].item_id, id);
        assert_eq!(jobs[0].content, "later");
        assert_eq!(jobs[0].attempt, 1);
    }

    #[tokio::test]
    async fn test_enqueue_failure_is_swallowed() {
        let f = Fixture::new(MockWorkQueue::failing());
        let service = f.service(MockEmbeddingProvider::new("mock", 4));

        let read = service
            .upsert(ItemCreate::new("later").with_async_embedding(true))
            .await
            .unwrap();

        assert!(!read.has_embedding);
        assert!(f.items.get(read.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cache_failure_does_not_fail_upsert() {
        let f = Fixture::new(MockWorkQueue::new());
        f.cache.fail_with(Some("down".to_string()));
        let service = f.service(MockEmbeddingProvider::new("mock", 4));

        let result = service.upsert(ItemCreate::new("doc")).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_empty_content_rejected() {
        let f = Fixture::new(MockWorkQueue::new());
        let service = f.service(MockEmbeddingProvider::new("mock", 4));

        let result = service.upsert(ItemCreate::new("  ")).await;

        assert!(matches!(result, Err(DomainError::InvalidArgument { .. })));
        assert_eq!(f.items.len().await, 0);
    }

    #[tokio::test]
    async fn test_wrong_embedding_dimension_rejected() {
        let f = Fixture::new(MockWorkQueue::new());
        let service = f.service(MockEmbeddingProvider::new("mock", 8));

        let result = service.upsert(ItemCreate::new("doc")).await;

        assert!(matches!(result, Err(DomainError::InvalidArgument { .. })));
    }

    #[tokio::test]
    async fn test_embedder_failure_propagates() {
        let f = Fixture::new(MockWorkQueue::new());
        let service = f.service(MockEmbeddingProvider::new("mock", 4).with_error("down"));

        let result = service.upsert(ItemCreate::new("doc")).await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let f = Fixture::new(MockWorkQueue::new());
        let service = f.service(MockEmbeddingProvider::new("mock", 4));

        let result = service.get(Uuid::new_v4()).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
