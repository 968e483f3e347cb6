//! In-memory cache implementation using moka

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use tokio::sync::Mutex;

use crate::domain::cache::Cache;
use crate::domain::DomainError;

/// Configuration for in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of expiring entries
    pub max_capacity: u64,
    /// Upper bound on any entry TTL
    pub max_ttl: Duration,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            max_ttl: Duration::from_secs(3600),
        }
    }
}

impl InMemoryCacheConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }
}

/// Cache entry stored in moka
#[derive(Debug, Clone)]
struct CacheEntry {
    data: String,
    /// Expiration timestamp (millis since epoch)
    expires_at: u64,
}

/// Process-local cache
///
/// Entries with a TTL live in moka and may be evicted under capacity
/// pressure. Entries without one (counters, the search namespace) live in a
/// separate map and are never evicted, so a namespace can not silently reset
/// to a value whose cache keys are still live.
#[derive(Debug)]
pub struct InMemoryCache {
    cache: MokaCache<String, CacheEntry>,
    persistent: Mutex<HashMap<String, String>>,
    /// Serialises read-modify-write operations
    write_lock: Mutex<()>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.max_ttl)
            .build();

        Self {
            cache,
            persistent: Mutex::new(HashMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    fn current_time_millis() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn is_expired(entry: &CacheEntry) -> bool {
        Self::current_time_millis() > entry.expires_at
    }

    async fn live_entry(&self, key: &str) -> Option<CacheEntry> {
        match self.cache.get(key).await {
            Some(entry) if Self::is_expired(&entry) => {
                self.cache.remove(key).await;
                None
            }
            other => other,
        }
    }

    async fn insert_expiring(&self, key: &str, value: String, ttl: Duration) {
        let entry = CacheEntry {
            data: value,
            expires_at: Self::current_time_millis() + ttl.as_millis() as u64,
        };
        self.cache.insert(key.to_string(), entry).await;
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        if let Some(entry) = self.live_entry(key).await {
            return Ok(Some(entry.data));
        }

        Ok(self.persistent.lock().await.get(key).cloned())
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        self.persistent.lock().await.remove(key);
        self.insert_expiring(key, value.to_string(), ttl).await;
        Ok(())
    }

    async fn set_nx_raw(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, DomainError> {
        let _guard = self.write_lock.lock().await;

        if self.get_raw(key).await?.is_some() {
            return Ok(false);
        }

        match ttl {
            Some(ttl) => self.insert_expiring(key, value.to_string(), ttl).await,
            None => {
                self.persistent
                    .lock()
                    .await
                    .insert(key.to_string(), value.to_string());
            }
        }

        Ok(true)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, DomainError> {
        let _guard = self.write_lock.lock().await;

        if let Some(value) = self.persistent.lock().await.remove(key) {
            self.insert_expiring(key, value, ttl).await;
            return Ok(true);
        }

        match self.live_entry(key).await {
            Some(entry) => {
                self.insert_expiring(key, entry.data, ttl).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn increment(&self, key: &str, delta: i64) -> Result<i64, DomainError> {
        let _guard = self.write_lock.lock().await;

        let parse = |raw: &str| {
            raw.parse::<i64>().map_err(|_| {
                DomainError::cache(format!("Value at '{}' is not an integer", key))
            })
        };

        if let Some(entry) = self.live_entry(key).await {
            let new_value = parse(&entry.data)? + delta;
            let updated = CacheEntry {
                data: new_value.to_string(),
                expires_at: entry.expires_at,
            };
            self.cache.insert(key.to_string(), updated).await;
            return Ok(new_value);
        }

        let mut persistent = self.persistent.lock().await;
        let current = match persistent.get(key) {
            Some(raw) => parse(raw)?,
            None => 0,
        };
        let new_value = current + delta;
        persistent.insert(key.to_string(), new_value.to_string());

        Ok(new_value)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
