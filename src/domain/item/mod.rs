//! Item domain - stored content with optional embeddings

mod entity;
mod filter;
mod repository;
mod validation;

pub use entity::{Item, ItemCreate, ItemRead, Metadata};
pub use filter::metadata_contains;
pub use repository::{ItemRepository, ScoredItem};
pub use validation::{
    validate_content, validate_embedding_dimension, ItemValidationError, MAX_CONTENT_LENGTH,
};

#[cfg(test)]
pub use repository::mock::MockItemRepository;
