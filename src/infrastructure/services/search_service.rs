//! Search orchestrator: cache-aside over embed, retrieve and re-rank

use std::fmt::Debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::cache::{Cache, CacheExt};
use crate::domain::{
    CacheNamespace, DomainError, EmbeddingProvider, ItemRepository, Reranker, SearchRequest,
    SearchResponse, SoftOutcome,
};
use crate::infrastructure::observability::{record_search, CacheOutcome};

/// Trait for search operations
#[async_trait]
pub trait SearchServiceTrait: Send + Sync + Debug {
    async fn search(&self, request: SearchRequest) -> Result<SearchResponse, DomainError>;
}

/// Search orchestrator
///
/// Cache-store failures never fail a search: a namespace or read error
/// falls through to a live computation and a write error is logged. Store
/// and model failures on the live path propagate.
#[derive(Debug)]
pub struct SearchService {
    items: Arc<dyn ItemRepository>,
    embedder: Arc<dyn EmbeddingProvider>,
    reranker: Reranker,
    cache: Arc<dyn Cache>,
    namespace: CacheNamespace,
    ttl: Duration,
}

impl SearchService {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        embedder: Arc<dyn EmbeddingProvider>,
        reranker: Reranker,
        cache: Arc<dyn Cache>,
        ttl: Duration,
    ) -> Self {
        Self {
            items,
            embedder,
            reranker,
            namespace: CacheNamespace::new(cache.clone()),
            cache,
            ttl,
        }
    }

    /// Cache key for the request, or `None` when the namespace is unreadable
    async fn cache_key(&self, request: &SearchRequest) -> Option<String> {
        match self.namespace.current().await {
            Ok(namespace) => Some(request.cache_key(&namespace)),
            Err(e) => {
                warn!(error = %e, "Cache namespace unavailable, bypassing cache");
                None
            }
        }
    }

    async fn lookup(&self, key: &str) -> Option<SearchResponse> {
        match self.cache.get::<SearchResponse>(key).await {
            Ok(cached) => cached,
            Err(e) => {
                warn!(cache_key = %key, error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    async fn compute(&self, request: &SearchRequest) -> Result<SearchResponse, DomainError> {
        let embedding = self.embedder.embed_one(&request.query).await?;

        let candidates = if request.wants_hybrid() {
            self.items
                .hybrid_search(
                    &embedding,
                    request.top_k,
                    request.effective_filters(),
                    request.effective_text_filter(),
                )
                .await?
        } else {
            self.items
                .vector_search(&embedding, request.top_k, request.effective_filters())
                .await?
        };

        let ranked = self.reranker.rerank(&request.query, candidates).await?;

        Ok(SearchResponse::from(ranked))
    }
}

#[async_trait]
impl SearchServiceTrait for SearchService {
    async fn search(&self, request: SearchRequest) -> Result<SearchResponse, DomainError> {
        request.validate()?;
        let started = Instant::now();

        let key = self.cache_key(&request).await;

        if let Some(key) = key.as_deref() {
            if let Some(cached) = self.lookup(key).await {
                debug!(cache_key = %key, hits = cached.len(), "Search cache hit");
                record_search(CacheOutcome::Hit, started.elapsed());
                return Ok(cached);
            }
        }

        let response = self.compute(&request).await?;

        let outcome = match key.as_deref() {
            Some(key) => {
                let stored = SoftOutcome::from_result(
                    "search_cache_write",
                    self.cache.set(key, &response, self.ttl).await,
                );
                debug!(cache_key = %key, stored = stored.is_done(), "Search cache miss");
                CacheOutcome::Miss
            }
            None => CacheOutcome::Bypass,
        };

        let elapsed = started.elapsed();
        record_search(outcome, elapsed);

        info!(
            top_k = request.top_k,
            hits = response.len(),
            hybrid = request.wants_hybrid(),
            cache = outcome.as_str(),
            duration_ms = elapsed.as_millis() as u64,
            "Search completed"
        );

        Ok(response)
    }
}
