//! Redis list-backed work queue

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::domain::queue::{EmbeddingJob, WorkQueue};
use crate::domain::DomainError;

/// Work queue over a Redis list: `LPUSH` to enqueue, `BRPOP` to dequeue
///
/// Blocking pops get their own connection so they never hold up pushes
/// issued from the same process.
#[derive(Clone)]
pub struct RedisWorkQueue {
    producer: ConnectionManager,
    consumer: ConnectionManager,
    queue_name: String,
}

impl fmt::Debug for RedisWorkQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisWorkQueue")
            .field("queue_name", &self.queue_name)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisWorkQueue {
    pub async fn new(url: &str, queue_name: impl Into<String>) -> Result<Self, DomainError> {
        let client = Client::open(url)
            .map_err(|e| DomainError::queue(format!("Failed to create Redis client: {}", e)))?;

        let producer = ConnectionManager::new(client.clone())
            .await
            .map_err(|e| DomainError::queue(format!("Failed to connect to Redis: {}", e)))?;
        let consumer = ConnectionManager::new(client)
            .await
            .map_err(|e| DomainError::queue(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self {
            producer,
            consumer,
            queue_name: queue_name.into(),
        })
    }
}

#[async_trait]
impl WorkQueue for RedisWorkQueue {
    async fn enqueue(&self, job: EmbeddingJob) -> Result<(), DomainError> {
        let payload = serde_json::to_string(&job)
            .map_err(|e| DomainError::queue(format!("Failed to serialize job: {}", e)))?;

        let mut conn = self.producer.clone();
        conn.lpush::<_, _, ()>(&self.queue_name, payload)
            .await
            .map_err(|e| DomainError::queue(format!("Redis LPUSH error: {}", e)))
    }

    async fn dequeue(&self, timeout: Duration) -> Result<Option<EmbeddingJob>, DomainError> {
        let mut conn = self.consumer.clone();
        let popped: Option<(String, String)> = conn
            .brpop(&self.queue_name, timeout.as_secs_f64())
            .await
            .map_err(|e| DomainError::queue(format!("Redis BRPOP error: {}", e)))?;

        match popped {
            Some((_, payload)) => parse_job(&self.queue_name, &payload).map(Some),
            None => Ok(None),
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

/// Decodes a popped payload; an undecodable one is already off the list, so
/// it is logged in full before being dropped
fn parse_job(queue_name: &str, payload: &str) -> Result<EmbeddingJob, DomainError> {
    serde_json::from_str(payload).map_err(|e| {
        tracing::error!(
            queue = queue_name,
            payload,
            error = %e,
            "Dropping malformed embedding job"
        );
        DomainError::queue(format!("Malformed job payload: {}", e))
    })
}
