//! Embedding job payload

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::item::Metadata;

/// Deferred embedding computation for one item
///
/// Idempotent: the same item id and content always yield the same
/// embedding, so redelivery is harmless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingJob {
    pub item_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    /// Delivery attempt, starting at 1
    #[serde(default = "first_attempt")]
    pub attempt: u32,
}

fn first_attempt() -> u32 {
    1
}

impl EmbeddingJob {
    pub fn new(item_id: Uuid, content: impl Into<String>, metadata: Option<Metadata>) -> Self {
        Self {
            item_id,
            content: content.into(),
            metadata,
            attempt: first_attempt(),
        }
    }

    /// The same job scheduled for another attempt
    pub fn retry(&self) -> Self {
        Self {
            attempt: self.attempt + 1,
            ..self.clone()
        }
    }
}
