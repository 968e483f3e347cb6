//! Item validation utilities

use std::fmt;

use crate::domain::DomainError;

/// Maximum content length in bytes
pub const MAX_CONTENT_LENGTH: usize = 1_000_000;

/// Item validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ItemValidationError {
    /// Content is empty or whitespace
    EmptyContent,
    /// Content exceeds maximum length
    ContentTooLong { length: usize, max: usize },
    /// Embedding length differs from the store dimension
    DimensionMismatch { expected: usize, actual: usize },
}

impl fmt::Display for ItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "Item content cannot be empty"),
            Self::ContentTooLong { length, max } => {
                write!(f, "Item content too long: {} bytes (max {})", length, max)
            }
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Embedding dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for ItemValidationError {}

impl From<ItemValidationError> for DomainError {
    fn from(error: ItemValidationError) -> Self {
        DomainError::invalid_argument(error.to_string())
    }
}

/// Validate item content
pub fn validate_content(content: &str) -> Result<(), ItemValidationError> {
    if content.trim().is_empty() {
        return Err(ItemValidationError::EmptyContent);
    }

    if content.len() > MAX_CONTENT_LENGTH {
        return Err(ItemValidationError::ContentTooLong {
            length: content.len(),
            max: MAX_CONTENT_LENGTH,
        });
    }

    Ok(())
}

/// Validate an embedding against the configured store dimension
pub fn validate_embedding_dimension(
    expected: usize,
    embedding: &[f32],
) -> Result<(), ItemValidationError> {
    if embedding.len() != expected {
        return Err(ItemValidationError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        });
    }

    Ok(())
}
