//! Infrastructure layer - External service implementations

pub mod cache;
pub mod embedding;
pub mod http;
pub mod item;
pub mod logging;
pub mod observability;
pub mod queue;
pub mod rerank;
pub mod services;
pub mod storage;
