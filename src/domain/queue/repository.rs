//! Work queue trait definition

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use super::EmbeddingJob;
use crate::domain::DomainError;

/// At-least-once queue of embedding jobs
#[async_trait]
pub trait WorkQueue: Send + Sync + Debug {
    async fn enqueue(&self, job: EmbeddingJob) -> Result<(), DomainError>;

    /// Waits up to `timeout` for the next job
    async fn dequeue(&self, timeout: Duration) -> Result<Option<EmbeddingJob>, DomainError>;

    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// FIFO queue with switchable enqueue failure
    #[derive(Debug, Default)]
    pub struct MockWorkQueue {
        jobs: Mutex<VecDeque<EmbeddingJob>>,
        fail_enqueue: Mutex<bool>,
    }

    impl MockWorkQueue {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing() -> Self {
            let queue = Self::default();
            *queue.fail_enqueue.lock().unwrap() = true;
            queue
        }

        pub fn len(&self) -> usize {
            self.jobs.lock().unwrap().len()
        }

        pub fn jobs(&self) -> Vec<EmbeddingJob> {
            self.jobs.lock().unwrap().iter().cloned().collect()
        }
    }

    #[async_trait]
    impl WorkQueue for MockWorkQueue {
        async fn enqueue(&self, job: EmbeddingJob) -> Result<(), DomainError> {
            if *self.fail_enqueue.lock().unwrap() {
                return Err(DomainError::queue("Mock queue configured to fail"));
            }
            self.jobs.lock().unwrap().push_back(job);
            Ok(())
        }

        async fn dequeue(&self, _timeout: Duration) -> Result<Option<EmbeddingJob>, DomainError> {
            Ok(self.jobs.lock().unwrap().pop_front())
        }

        fn backend_name(&self) -> &'static str {
            "mock"
        }
    }
}
