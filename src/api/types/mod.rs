//! HTTP wire types

pub mod embeddings;
pub mod error;
pub mod json;

pub use embeddings::{EmbeddingsRequest, EmbeddingsResponse};
pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
