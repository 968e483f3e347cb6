//! Token-overlap relevance model

use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

use crate::domain::rerank::RelevanceModel;

/// Fraction of distinct query words present in the candidate
#[derive(Debug, Clone, Default)]
pub struct LexicalOverlapModel;

impl LexicalOverlapModel {
    pub fn new() -> Self {
        Self
    }

    fn words(text: &str) -> HashSet<String> {
        text.unicode_words().map(str::to_lowercase).collect()
    }
}

impl RelevanceModel for LexicalOverlapModel {
    fn score(&self, query: &str, candidate: &str) -> f32 {
        let query_words = Self::words(query);
        if query_words.is_empty() {
            return 0.0;
        }

        let candidate_words = Self::words(candidate);
        let matched = query_words
            .iter()
            .filter(|w| candidate_words.contains(*w))
            .count();

        matched as f32 / query_words.len() as f32
    }

    fn name(&self) -> &'static str {
        "lexical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_fraction() {
        let model = LexicalOverlapModel::new();

        assert_eq!(model.score("Hello World", "hello there, world!"), 1.0);
        assert_eq!(model.score("hello world", "hello"), 0.5);
        assert_eq!(model.score("hello", "goodbye"), 0.0);
        assert_eq!(model.score("", "anything"), 0.0);
    }
}
