//! Application state for shared services

use std::sync::Arc;

use crate::domain::cache::Cache;
use crate::domain::{EmbeddingProvider, ItemRepository};
use crate::infrastructure::observability::PrometheusMetrics;

use super::middleware::RateLimiter;

pub use crate::infrastructure::services::{ItemServiceTrait, SearchServiceTrait};

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub search_service: Arc<dyn SearchServiceTrait>,
    pub item_service: Arc<dyn ItemServiceTrait>,
    pub embedder: Arc<dyn EmbeddingProvider>,
    /// Pinged by `/health`
    pub items: Arc<dyn ItemRepository>,
    /// Pinged by `/health`
    pub cache: Arc<dyn Cache>,
    pub rate_limiter: Option<RateLimiter>,
    pub metrics: Option<PrometheusMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("embedder", &self.embedder.provider_name())
            .field("rate_limited", &self.rate_limiter.is_some())
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}
