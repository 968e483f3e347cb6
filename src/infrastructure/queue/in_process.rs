//! In-process work queue on a tokio channel

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use crate::domain::queue::{EmbeddingJob, WorkQueue};
use crate::domain::DomainError;

/// Unbounded in-process queue
///
/// Jobs are lost when the process exits. Only a worker running in the same
/// process can consume them.
#[derive(Debug)]
pub struct InProcessWorkQueue {
    sender: mpsc::UnboundedSender<EmbeddingJob>,
    receiver: Mutex<mpsc::UnboundedReceiver<EmbeddingJob>>,
}

impl InProcessWorkQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver: Mutex::new(receiver),
        }
    }
}

impl Default for InProcessWorkQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkQueue for InProcessWorkQueue {
    async fn enqueue(&self, job: EmbeddingJob) -> Result<(), DomainError> {
        self.sender
            .send(job)
            .map_err(|_| DomainError::queue("In-process queue is closed"))
    }

    async fn dequeue(&self, timeout: Duration) -> Result<Option<EmbeddingJob>, DomainError> {
        let mut receiver = self.receiver.lock().await;

        match tokio::time::timeout(timeout, receiver.recv()).await {
            Ok(job) => Ok(job),
            Err(_) => Ok(None),
        }
    }

    fn backend_name(&self) -> &'static str {
        "in_process"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_fifo_order() {
        let queue = InProcessWorkQueue::new();
        let first = EmbeddingJob::new(Uuid::new_v4(), "first", None);
        let second = EmbeddingJob::new(Uuid::new_v4(), "second", None);

        queue.enqueue(first.clone()).await.unwrap();
        queue.enqueue(second.clone()).await.unwrap();

        let timeout = Duration::from_millis(10);
        assert_eq!(queue.dequeue(timeout).await.unwrap(), Some(first));
        assert_eq!(queue.dequeue(timeout).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_empty_dequeue_times_out() {
        let queue = InProcessWorkQueue::new();

        let job = queue.dequeue(Duration::from_millis(10)).await.unwrap();

        assert!(job.is_none());
    }
}
