//! Embedding worker - drains the work queue and backfills item embeddings

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::domain::queue::{EmbeddingJob, WorkQueue};
use crate::domain::{CacheNamespace, DomainError, EmbeddingProvider, ItemRepository};
use crate::infrastructure::observability::{record_embedding_job, record_namespace_bump};

const ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// What happened to a dequeued job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Done,
    /// Failed and re-enqueued with the next attempt number
    Retried,
    /// Failed on its last attempt
    Dropped,
}

impl JobStatus {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::Retried => "retried",
            Self::Dropped => "dropped",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddingWorker {
    queue: Arc<dyn WorkQueue>,
    items: Arc<dyn ItemRepository>,
    embedder: Arc<dyn EmbeddingProvider>,
    namespace: CacheNamespace,
    max_attempts: u32,
    poll_timeout: Duration,
}

impl EmbeddingWorker {
    pub fn new(
        queue: Arc<dyn WorkQueue>,
        items: Arc<dyn ItemRepository>,
        embedder: Arc<dyn EmbeddingProvider>,
        namespace: CacheNamespace,
    ) -> Self {
        Self {
            queue,
            items,
            embedder,
            namespace,
            max_attempts: 3,
            poll_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    /// Processes jobs until `shutdown` flips to `true` or its sender is dropped
    ///
    /// Shutdown is only checked between polls: an in-flight dequeue may
    /// already have removed the job from the backend, so it is never
    /// cancelled. Stopping therefore takes up to `poll_timeout`.
    pub async fn run(&self, shutdown: watch::Receiver<bool>) {
        tracing::info!(
            backend = self.queue.backend_name(),
            max_attempts = self.max_attempts,
            "Embedding worker started"
        );

        while !shutdown_requested(&shutdown) {
            match self.queue.dequeue(self.poll_timeout).await {
                Ok(Some(job)) => {
                    self.handle(job).await;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to dequeue embedding job");
                    tokio::time::sleep(ERROR_BACKOFF).await;
                }
            }
        }

        tracing::info!("Embedding worker stopped");
    }

    /// Dequeues and handles at most one job
    pub async fn process_next(&self) -> Result<Option<JobStatus>, DomainError> {
        match self.queue.dequeue(self.poll_timeout).await? {
            Some(job) => Ok(Some(self.handle(job).await)),
            None => Ok(None),
        }
    }

    /// Handles one job, re-enqueueing it on failure while attempts remain
    pub async fn handle(&self, job: EmbeddingJob) -> JobStatus {
        let status = match self.apply(&job).await {
            Ok(()) => {
                tracing::debug!(item_id = %job.item_id, attempt = job.attempt, "Embedding job done");
                JobStatus::Done
            }
            Err(e) if job.attempt < self.max_attempts => {
                tracing::warn!(
                    item_id = %job.item_id,
                    attempt = job.attempt,
                    error = %e,
                    "Embedding job failed, retrying"
                );

                match self.queue.enqueue(job.retry()).await {
                    Ok(()) => JobStatus::Retried,
                    Err(qe) => {
                        tracing::error!(
                            item_id = %job.item_id,
                            error = %qe,
                            "Failed to re-enqueue embedding job"
                        );
                        JobStatus::Dropped
                    }
                }
            }
            Err(e) => {
                tracing::error!(
                    item_id = %job.item_id,
                    attempt = job.attempt,
                    error = %e,
                    "Embedding job dropped after final attempt"
                );
                JobStatus::Dropped
            }
        };

        record_embedding_job(status.as_str());
        status
    }

    async fn apply(&self, job: &EmbeddingJob) -> Result<(), DomainError> {
        let embedding = self.embedder.embed_one(&job.content).await?;

        let updated = self.items.set_embedding(job.item_id, &embedding).await?;
        if !updated {
            // Row vanished since enqueue; write it back whole
            self.items
                .upsert(
                    job.item_id,
                    &job.content,
                    job.metadata.as_ref(),
                    Some(&embedding),
                )
                .await?;
        }

        if self.namespace.bump_soft().await.is_done() {
            record_namespace_bump();
        }

        Ok(())
    }
}

fn shutdown_requested(shutdown: &watch::Receiver<bool>) -> bool {
    *shutdown.borrow() || shutdown.has_changed().is_err()
}
