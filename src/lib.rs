//! PMP Retrieval Gateway
//!
//! Semantic retrieval over stored text items:
//! - Vector and hybrid (metadata/keyword filtered) search on pgvector
//! - Namespaced search cache with write-triggered invalidation
//! - Optional cross-encoder style re-ranking
//! - Deferred embedding through a work queue and worker

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::{info, warn};

use api::middleware::RateLimiter;
use api::state::AppState;
use domain::{Cache, CacheNamespace, ItemRepository};
use infrastructure::{
    cache::{CacheConfig, CacheFactory},
    embedding::create_embedding_provider,
    item::{InMemoryItemRepository, PgvectorItemRepository},
    observability::init_metrics,
    queue::{create_work_queue, EmbeddingWorker, QueueType},
    rerank::create_reranker,
    services::{ItemService, SearchService},
    storage::{connect_pool, run_item_migrations, PostgresConfig},
};

/// Everything the binary needs: the HTTP state and a worker over the same
/// store, queue and cache namespace
#[derive(Debug, Clone)]
pub struct AppComponents {
    pub state: AppState,
    pub worker: EmbeddingWorker,
}

/// Build the cache store from the `cache` section
pub async fn create_cache(config: &AppConfig) -> anyhow::Result<Arc<dyn Cache>> {
    let cache_config = CacheConfig::from_settings(&config.cache);
    Ok(CacheFactory::new().create(&cache_config).await?)
}

/// Build the item store: pgvector when a database URL is configured, memory
/// otherwise
pub async fn create_item_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn ItemRepository>> {
    let database = &config.database;

    match &database.url {
        Some(url) => {
            let pool = connect_pool(&PostgresConfig::from_database_config(url, database)).await?;

            if database.run_migrations {
                run_item_migrations(&pool, database.embedding_dim).await?;
            }

            info!(dimension = database.embedding_dim, "Using pgvector item store");
            Ok(Arc::new(PgvectorItemRepository::new(
                pool,
                database.embedding_dim,
                database.statement_timeout(),
            )))
        }
        None => {
            warn!("No database URL configured, items are kept in memory");
            Ok(Arc::new(InMemoryItemRepository::new(database.embedding_dim)))
        }
    }
}

/// Wire every service from configuration
pub async fn create_components(config: &AppConfig) -> anyhow::Result<AppComponents> {
    let cache = create_cache(config).await?;
    let items = create_item_repository(config).await?;
    let embedder = create_embedding_provider(&config.embedding, config.database.embedding_dim)?;
    let reranker = create_reranker(&config.rerank)?;
    let queue = create_work_queue(&config.queue).await?;
    let namespace = CacheNamespace::new(cache.clone());

    if config.queue.backend == QueueType::Redis && config.database.url.is_none() {
        warn!("Redis queue with an in-memory item store: a separate worker cannot see these items");
    }

    let search_service = Arc::new(SearchService::new(
        items.clone(),
        embedder.clone(),
        reranker,
        cache.clone(),
        config.cache.ttl(),
    ));
    let item_service = Arc::new(ItemService::new(
        items.clone(),
        embedder.clone(),
        queue.clone(),
        namespace.clone(),
    ));

    let worker = EmbeddingWorker::new(queue, items.clone(), embedder.clone(), namespace)
        .with_max_attempts(config.queue.max_attempts)
        .with_poll_timeout(config.queue.poll_timeout());

    let rate_limiter = config.rate_limit.enabled.then(|| {
        RateLimiter::new(
            cache.clone(),
            config.rate_limit.requests,
            std::time::Duration::from_secs(config.rate_limit.window_secs),
        )
    });

    let state = AppState {
        search_service,
        item_service,
        embedder,
        items,
        cache,
        rate_limiter,
        metrics: init_metrics(&config.metrics),
    };

    info!(
        embedder = state.embedder.provider_name(),
        queue = %config.queue.backend,
        rate_limited = config.rate_limit.enabled,
        "Application components initialized"
    );

    Ok(AppComponents { state, worker })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use api::{create_router, RouterOptions};
    use infrastructure::queue::JobStatus;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.metrics.enabled = false;
        config.rate_limit.enabled = false;
        config
    }

    async fn app(config: &AppConfig) -> (Router, AppComponents) {
        let components = create_components(config).await.unwrap();
        let router = create_router(components.state.clone(), &RouterOptions::default());
        (router, components)
    }

    async fn call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_sync_upsert_is_top_search_result() {
        let (router, _) = app(&test_config()).await;

        let (status, item) = call(
            &router,
            "POST",
            "/v1/items",
            Some(json!({"content": "hello world", "metadata": {"source": "unit"}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(item["has_embedding"], true);

        call(&router, "POST", "/v1/items", Some(json!({"content": "quarterly tax report"}))).await;

        let (status, found) = call(
            &router,
            "POST",
            "/v1/search",
            Some(json!({"query": "hello world", "top_k": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found["results"][0]["id"], item["id"]);
        assert!((found["results"][0]["score"].as_f64().unwrap() - 1.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn test_async_upsert_becomes_searchable_after_worker() {
        let (router, components) = app(&test_config()).await;

        let (_, created) = call(
            &router,
            "POST",
            "/v1/items",
            Some(json!({"content": "deferred embedding", "async_embedding": true})),
        )
        .await;
        assert_eq!(created["has_embedding"], false);
        let uri = format!("/v1/items/{}", created["id"].as_str().unwrap());

        let (_, before) = call(&router, "GET", &uri, None).await;
        assert_eq!(before["has_embedding"], false);

        let (_, missing) = call(
            &router,
            "POST",
            "/v1/search",
            Some(json!({"query": "deferred embedding"})),
        )
        .await;
        assert_eq!(missing["results"].as_array().unwrap().len(), 0);

        let status = components.worker.process_next().await.unwrap();
        assert_eq!(status, Some(JobStatus::Done));

        let (_, after) = call(&router, "GET", &uri, None).await;
        assert_eq!(after["has_embedding"], true);

        let (_, found) = call(
            &router,
            "POST",
            "/v1/search",
            Some(json!({"query": "deferred embedding"})),
        )
        .await;
        assert_eq!(found["results"][0]["id"], created["id"]);
    }

    #[tokio::test]
    async fn test_hybrid_filter_keeps_matching_metadata() {
        let (router, _) = app(&test_config()).await;

        let (_, a) = call(
            &router,
            "POST",
            "/v1/items",
            Some(json!({"content": "shared text", "metadata": {"source": "a"}})),
        )
        .await;
        call(
            &router,
            "POST",
            "/v1/items",
            Some(json!({"content": "shared text", "metadata": {"source": "b"}})),
        )
        .await;

        let (_, found) = call(
            &router,
            "POST",
            "/v1/search",
            Some(json!({"query": "shared text", "filters": {"source": "a"}, "use_hybrid": true})),
        )
        .await;

        let results = found["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["id"], a["id"]);
    }

    #[tokio::test]
    async fn test_rerank_orders_by_relevance() {
        let mut config = test_config();
        config.rerank.enabled = true;
        let (router, _) = app(&config).await;

        for content in ["rust async runtime", "rust", "gardening tips"] {
            call(&router, "POST", "/v1/items", Some(json!({"content": content}))).await;
        }

        let (_, found) = call(
            &router,
            "POST",
            "/v1/search",
            Some(json!({"query": "rust async runtime", "top_k": 3})),
        )
        .await;

        let results = found["results"].as_array().unwrap();
        assert_eq!(results[0]["content"], "rust async runtime");
        let scores: Vec<f64> = results.iter().map(|r| r["score"].as_f64().unwrap()).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_cached_search_until_write_bumps_namespace() {
        let (router, components) = app(&test_config()).await;
        let query = json!({"query": "cache me"});

        let (_, first) = call(&router, "POST", "/v1/search", Some(query.clone())).await;
        assert_eq!(first["results"].as_array().unwrap().len(), 0);

        // Written behind the service's back: no namespace bump
        let embedding = components.state.embedder.embed(vec!["cache me".to_string()]).await.unwrap();
        components
            .state
            .items
            .upsert(Uuid::new_v4(), "cache me", None, Some(&embedding[0]))
            .await
            .unwrap();

        let (_, stale) = call(&router, "POST", "/v1/search", Some(query.clone())).await;
        assert_eq!(stale, first);

        call(&router, "POST", "/v1/items", Some(json!({"content": "cache me too"}))).await;

        let (_, fresh) = call(&router, "POST", "/v1/search", Some(query)).await;
        assert_eq!(fresh["results"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_default_config_builds_in_memory_components() {
        let mut config = AppConfig::default();
        config.metrics.enabled = false;

        let components = create_components(&config).await.unwrap();

        assert!(components.state.rate_limiter.is_some());
        assert!(components.state.metrics.is_none());
        assert_eq!(components.state.embedder.dimensions(), 384);
        components.state.items.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_cache_without_url_fails() {
        let mut config = AppConfig::default();
        config.cache.backend = infrastructure::cache::CacheType::Redis;

        assert!(create_cache(&config).await.is_err());
    }
}
