//! Work queue backends and the embedding worker

mod factory;
mod in_process;
mod redis;
mod worker;

pub use factory::{create_work_queue, QueueType};
pub use in_process::InProcessWorkQueue;
pub use redis::RedisWorkQueue;
pub use worker::{EmbeddingWorker, JobStatus};
