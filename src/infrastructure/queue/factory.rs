//! Work queue factory

use std::sync::Arc;

use serde::Deserialize;

use crate::config::QueueConfig;
use crate::domain::queue::WorkQueue;
use crate::domain::DomainError;

use super::in_process::InProcessWorkQueue;
use super::redis::RedisWorkQueue;

/// Supported work queue backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueType {
    #[default]
    InProcess,
    Redis,
}

impl std::fmt::Display for QueueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueType::InProcess => write!(f, "in_process"),
            QueueType::Redis => write!(f, "redis"),
        }
    }
}

/// Creates the configured work queue
pub async fn create_work_queue(config: &QueueConfig) -> Result<Arc<dyn WorkQueue>, DomainError> {
    let queue: Arc<dyn WorkQueue> = match config.backend {
        QueueType::InProcess => Arc::new(InProcessWorkQueue::new()),
        QueueType::Redis => {
            let url = config.redis_url.as_deref().ok_or_else(|| {
                DomainError::configuration("queue.redis_url is required for the redis backend")
            })?;
            Arc::new(RedisWorkQueue::new(url, config.queue_name.clone()).await?)
        }
    };

    tracing::info!(backend = %config.backend, queue = %config.queue_name, "Work queue initialized");

    Ok(queue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_in_process() {
        let queue = create_work_queue(&QueueConfig::default()).await.unwrap();
        assert_eq!(queue.backend_name(), "in_process");
    }

    #[tokio::test]
    async fn test_redis_requires_url() {
        let config = QueueConfig {
            backend: QueueType::Redis,
            redis_url: None,
            ..QueueConfig::default()
        };

        let result = create_work_queue(&config).await;

        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }
}
