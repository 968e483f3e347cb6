//! Work queue domain - deferred embedding jobs

mod job;
mod repository;

pub use job::EmbeddingJob;
pub use repository::WorkQueue;

#[cfg(test)]
pub use repository::mock::MockWorkQueue;
