//! Embeddings endpoint types

use serde::{Deserialize, Serialize};

/// Either a single `text`, a batch of `texts`, or both
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbeddingsRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub texts: Option<Vec<String>>,
}

impl EmbeddingsRequest {
    /// All inputs in request order, `text` first
    pub fn into_inputs(self) -> Vec<String> {
        self.text
            .into_iter()
            .chain(self.texts.unwrap_or_default())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsResponse {
    pub embeddings: Vec<Vec<f32>>,
}
