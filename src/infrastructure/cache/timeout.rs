//! Time-bounded cache wrapper

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::cache::Cache;
use crate::domain::DomainError;

/// Bounds every call on the inner cache; an elapsed call becomes
/// `CacheUnavailable`
#[derive(Debug, Clone)]
pub struct TimeoutCache {
    inner: Arc<dyn Cache>,
    timeout: Duration,
}

impl TimeoutCache {
    pub fn new(inner: Arc<dyn Cache>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        future: impl Future<Output = Result<T, DomainError>>,
    ) -> Result<T, DomainError> {
        match tokio::time::timeout(self.timeout, future).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::cache(format!(
                "Cache {} timed out after {}ms",
                operation,
                self.timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl Cache for TimeoutCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.bounded("get", self.inner.get_raw(key)).await
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        self.bounded("set", self.inner.set_raw(key, value, ttl)).await
    }

    async fn set_nx_raw(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, DomainError> {
        self.bounded("set_nx", self.inner.set_nx_raw(key, value, ttl))
            .await
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        self.bounded("exists", self.inner.exists(key)).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, DomainError> {
        self.bounded("expire", self.inner.expire(key, ttl)).await
    }

    async fn increment(&self, key: &str, delta: i64) -> Result<i64, DomainError> {
        self.bounded("increment", self.inner.increment(key, delta))
            .await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.bounded("ping", self.inner.ping()).await
    }
}
