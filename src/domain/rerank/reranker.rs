//! Re-ranker

use std::sync::Arc;

use crate::domain::item::ScoredItem;
use crate::domain::DomainError;

use super::RelevanceScorer;

/// Replaces retrieval scores with relevance scores and re-sorts
///
/// Identity when disabled or when there is nothing to rank. The sort is
/// stable, so ties keep the retrieval order.
#[derive(Debug, Clone)]
pub struct Reranker {
    scorer: Option<Arc<dyn RelevanceScorer>>,
}

impl Reranker {
    pub fn new(scorer: Arc<dyn RelevanceScorer>) -> Self {
        Self {
            scorer: Some(scorer),
        }
    }

    pub fn disabled() -> Self {
        Self { scorer: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.scorer.is_some()
    }

    pub async fn rerank(
        &self,
        query: &str,
        mut results: Vec<ScoredItem>,
    ) -> Result<Vec<ScoredItem>, DomainError> {
        let scorer = match &self.scorer {
            Some(scorer) if !results.is_empty() => scorer,
            _ => return Ok(results),
        };

        let candidates: Vec<String> = results.iter().map(|r| r.content.clone()).collect();
        let scores = scorer.score(query, candidates).await?;

        if scores.len() != results.len() {
            return Err(DomainError::provider(
                scorer.scorer_name(),
                format!(
                    "Expected {} relevance scores, got {}",
                    results.len(),
                    scores.len()
                ),
            ));
        }

        for (result, score) in results.iter_mut().zip(scores) {
            result.score = score;
        }

        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rerank::MockRelevanceScorer;
    use uuid::Uuid;

    fn scored(content: &str, score: f32) -> ScoredItem {
        ScoredItem {
            id: Uuid::new_v4(),
            content: content.to_string(),
            metadata: None,
            score,
        }
    }

    fn contents(results: &[ScoredItem]) -> Vec<&str> {
        results.iter().map(|r| r.content.as_str()).collect()
    }

    #[tokio::test]
    async fn test_disabled_is_identity() {
        let input = vec![scored("A", 0.9), scored("B", 0.95)];

        let output = Reranker::disabled().rerank("q", input.clone()).await.unwrap();

        assert_eq!(output, input);
    }

    #[tokio::test]
    async fn test_empty_results_skip_scorer() {
        let scorer = Arc::new(MockRelevanceScorer::new());
        let reranker = Reranker::new(scorer.clone());

        let output = reranker.rerank("q", Vec::new()).await.unwrap();

        assert!(output.is_empty());
        assert_eq!(scorer.calls(), 0);
    }

    #[tokio::test]
    async fn test_reorders_by_new_scores() {
        let scorer = MockRelevanceScorer::new()
            .with_score("A", 0.8)
            .with_score("B", 0.1);
        let reranker = Reranker::new(Arc::new(scorer));

        let output = reranker
            .rerank("q", vec![scored("B", 0.95), scored("A", 0.9)])
            .await
            .unwrap();

        assert_eq!(contents(&output), vec!["A", "B"]);
        assert_eq!(output[0].score, 0.8);
        assert_eq!(output[1].score, 0.1);
    }

    #[tokio::test]
    async fn test_new_scores_replace_vector_scores() {
        let scorer = MockRelevanceScorer::new()
            .with_score("A", 0.7)
            .with_score("B", 0.2);
        let reranker = Reranker::new(Arc::new(scorer));

        let output = reranker
            .rerank("q", vec![scored("A", 0.9), scored("B", 0.95)])
            .await
            .unwrap();

        assert_eq!(contents(&output), vec!["A", "B"]);
        assert!(output[0].score > output[1].score);
    }

    #[tokio::test]
    async fn test_ties_keep_retrieval_order() {
        let reranker = Reranker::new(Arc::new(MockRelevanceScorer::new()));

        let output = reranker
            .rerank("q", vec![scored("X", 0.9), scored("Y", 0.8), scored("Z", 0.7)])
            .await
            .unwrap();

        assert_eq!(contents(&output), vec!["X", "Y", "Z"]);
    }

    #[tokio::test]
    async fn test_scorer_error_propagates() {
        let reranker = Reranker::new(Arc::new(MockRelevanceScorer::new().with_error("down")));

        let result = reranker.rerank("q", vec![scored("A", 0.9)]).await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }
}
