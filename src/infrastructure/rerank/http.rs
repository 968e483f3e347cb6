//! Cross-encoder served over HTTP

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::rerank::RelevanceScorer;
use crate::domain::DomainError;
use crate::infrastructure::http::HttpClientTrait;

const SCORER_NAME: &str = "http-rerank";

/// Posts `{model, query, documents}` to `{base_url}/rerank`
///
/// Accepts either `{"results": [{"index", "relevance_score"}]}` or a bare
/// `[{"index", "score"}]` array.
#[derive(Debug)]
pub struct HttpRelevanceScorer<C: HttpClientTrait> {
    client: C,
    base_url: String,
    model: String,
}

impl<C: HttpClientTrait> HttpRelevanceScorer<C> {
    pub fn new(client: C, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn rerank_url(&self) -> String {
        format!("{}/rerank", self.base_url)
    }

    fn parse_response(
        &self,
        json: serde_json::Value,
        expected: usize,
    ) -> Result<Vec<f32>, DomainError> {
        let response: WireRerankResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider(SCORER_NAME, format!("Failed to parse rerank response: {}", e))
        })?;

        let entries = match response {
            WireRerankResponse::Wrapped { results } => results,
            WireRerankResponse::Bare(results) => results,
        };

        let mut scores = vec![None; expected];
        for entry in entries {
            let slot = scores.get_mut(entry.index).ok_or_else(|| {
                DomainError::provider(
                    SCORER_NAME,
                    format!("Score index {} out of range", entry.index),
                )
            })?;
            *slot = Some(entry.score);
        }

        scores
            .into_iter()
            .enumerate()
            .map(|(idx, score)| {
                score.ok_or_else(|| {
                    DomainError::provider(SCORER_NAME, format!("Missing score for index {}", idx))
                })
            })
            .collect()
    }
}

#[async_trait]
impl<C: HttpClientTrait> RelevanceScorer for HttpRelevanceScorer<C> {
    async fn score(&self, query: &str, candidates: Vec<String>) -> Result<Vec<f32>, DomainError> {
        let expected = candidates.len();
        let body = serde_json::json!({
            "model": self.model,
            "query": query,
            "documents": candidates,
        });

        let response = self
            .client
            .post_json(
                &self.rerank_url(),
                vec![("Content-Type", "application/json")],
                &body,
            )
            .await?;

        self.parse_response(response, expected)
    }

    fn scorer_name(&self) -> &'static str {
        SCORER_NAME
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireRerankResponse {
    Wrapped { results: Vec<WireRerankEntry> },
    Bare(Vec<WireRerankEntry>),
}

#[derive(Debug, Deserialize)]
struct WireRerankEntry {
    index: usize,
    #[serde(alias = "relevance_score")]
    score: f32,
}
