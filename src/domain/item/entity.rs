//! Item entity and its create/read shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-form JSON metadata attached to an item
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A stored item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    id: Uuid,
    content: String,
    metadata: Option<Metadata>,
    embedding: Option<Vec<f32>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Item {
    /// Create a new item without an embedding
    pub fn new(id: Uuid, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            content: content.into(),
            metadata: None,
            embedding: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_metadata(mut self, metadata: Option<Metadata>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_embedding(mut self, embedding: Option<Vec<f32>>) -> Self {
        self.embedding = embedding;
        self
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    // Getters
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn embedding(&self) -> Option<&[f32]> {
        self.embedding.as_deref()
    }

    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overwrites content and metadata; keeps the embedding unless a new one is given
    pub fn apply_upsert(
        &mut self,
        content: impl Into<String>,
        metadata: Option<Metadata>,
        embedding: Option<Vec<f32>>,
    ) {
        self.content = content.into();
        self.metadata = metadata;
        if embedding.is_some() {
            self.embedding = embedding;
        }
        self.updated_at = Utc::now();
    }

    /// Replaces only the embedding
    pub fn set_embedding(&mut self, embedding: Vec<f32>) {
        self.embedding = Some(embedding);
        self.updated_at = Utc::now();
    }
}

/// Upsert command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemCreate {
    /// Generated when absent
    #[serde(default)]
    pub id: Option<Uuid>,
    pub content: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    /// Defer embedding computation to the background worker
    #[serde(default)]
    pub async_embedding: bool,
}

impl ItemCreate {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_async_embedding(mut self, async_embedding: bool) -> Self {
        self.async_embedding = async_embedding;
        self
    }
}

/// Read view of an item; the vector itself is never returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRead {
    pub id: Uuid,
    pub content: String,
    pub metadata: Option<Metadata>,
    pub has_embedding: bool,
}

impl From<&Item> for ItemRead {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id(),
            content: item.content().to_string(),
            metadata: item.metadata().cloned(),
            has_embedding: item.has_embedding(),
        }
    }
}

impl From<Item> for ItemRead {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            content: item.content,
            metadata: item.metadata,
            has_embedding: item.embedding.is_some(),
        }
    }
}
