//! Cache namespace: a versioned token that invalidates every cached search
//! at once
//!
//! Search cache keys embed the current token. Bumping it makes all entries
//! written under the previous token unreachable; they are left to expire
//! through their TTL.

use std::sync::Arc;

use crate::domain::cache::Cache;
use crate::domain::{DomainError, SoftOutcome};

/// Well-known key holding the token
pub const NAMESPACE_KEY: &str = "search:ns";

pub const INITIAL_NAMESPACE: &str = "1";

/// Reads and bumps the search cache namespace in the shared cache store
#[derive(Debug, Clone)]
pub struct CacheNamespace {
    cache: Arc<dyn Cache>,
}

impl CacheNamespace {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self { cache }
    }

    /// Returns the current token, initialising it when absent
    ///
    /// Concurrent first reads race on `SET NX` and then re-read, so they
    /// all converge on the winning value.
    pub async fn current(&self) -> Result<String, DomainError> {
        if let Some(namespace) = self.cache.get_raw(NAMESPACE_KEY).await? {
            return Ok(namespace);
        }

        self.cache
            .set_nx_raw(NAMESPACE_KEY, INITIAL_NAMESPACE, None)
            .await?;

        Ok(self
            .cache
            .get_raw(NAMESPACE_KEY)
            .await?
            .unwrap_or_else(|| INITIAL_NAMESPACE.to_string()))
    }

    /// Atomically increments the token, returning the new value
    pub async fn bump(&self) -> Result<i64, DomainError> {
        let namespace = self.cache.increment(NAMESPACE_KEY, 1).await?;
        tracing::debug!(namespace, "Cache namespace bumped");
        Ok(namespace)
    }

    /// Bumps as a best-effort side effect of a write
    pub async fn bump_soft(&self) -> SoftOutcome {
        SoftOutcome::from_result("cache_namespace_bump", self.bump().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCache;
    use crate::domain::search::SearchRequest;

    #[tokio::test]
    async fn test_initialises_to_one() {
        let cache = Arc::new(MockCache::new());
        let namespace = CacheNamespace::new(cache.clone());

        assert_eq!(namespace.current().await.unwrap(), "1");
        assert_eq!(cache.raw(NAMESPACE_KEY), Some("1".to_string()));
        assert_eq!(cache.ttl_of(NAMESPACE_KEY), None);
    }

    #[tokio::test]
    async fn test_existing_value_is_kept() {
        let cache = Arc::new(MockCache::new().with_raw_entry(NAMESPACE_KEY, "42"));
        let namespace = CacheNamespace::new(cache);

        assert_eq!(namespace.current().await.unwrap(), "42");
    }

    #[tokio::test]
    async fn test_bump_increments() {
        let cache = Arc::new(MockCache::new());
        let namespace = CacheNamespace::new(cache);

        namespace.current().await.unwrap();
        assert_eq!(namespace.bump().await.unwrap(), 2);
        assert_eq!(namespace.current().await.unwrap(), "2");
    }

    #[tokio::test]
    async fn test_bump_changes_cache_key() {
        let namespace = CacheNamespace::new(Arc::new(MockCache::new()));
        let request = SearchRequest::new("hello world");

        let before = request.cache_key(&namespace.current().await.unwrap());
        namespace.bump().await.unwrap();
        let after = request.cache_key(&namespace.current().await.unwrap());

        assert_ne!(before, after);
    }

    #[tokio::test]
    async fn test_concurrent_initialisation_converges() {
        let namespace = CacheNamespace::new(Arc::new(MockCache::new()));

        let (a, b) = tokio::join!(namespace.current(), namespace.current());
        assert_eq!(a.unwrap(), b.unwrap());
    }

    #[tokio::test]
    async fn test_bump_soft_swallows_failure() {
        let namespace = CacheNamespace::new(Arc::new(MockCache::new().with_error("down")));

        assert!(!namespace.bump_soft().await.is_done());
        assert!(namespace.current().await.is_err());
    }
}
