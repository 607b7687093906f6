//! Offline lexicon classifier.
//!
//! Word-list scoring with negation and intensifier handling. No network, no
//! model weights; useful for local development and as a fallback backend.

use crate::domain::{Classification, DomainError};
use crate::ports::SentimentClassifier;
use std::collections::HashMap;

pub const POSITIVE_LABEL: &str = "POSITIVE";
pub const NEGATIVE_LABEL: &str = "NEGATIVE";
/// Emitted when no sentiment words matched or they cancel out.
pub const NEUTRAL_LABEL: &str = "NEUTRAL";

/// Rule-based sentiment classifier for short comments.
pub struct LexiconClassifier {
    words: HashMap<&'static str, f32>,
    negations: Vec<&'static str>,
    intensifiers: HashMap<&'static str, f32>,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconClassifier {
    /// Create a classifier with the built-in comment vocabulary.
    pub fn new() -> Self {
        let positive = [
            ("love", 0.9),
            ("loved", 0.9),
            ("awesome", 0.9),
            ("amazing", 0.9),
            ("great", 0.7),
            ("good", 0.5),
            ("nice", 0.5),
            ("best", 0.8),
            ("beautiful", 0.7),
            ("excellent", 0.9),
            ("fantastic", 0.9),
            ("brilliant", 0.8),
            ("helpful", 0.6),
            ("thanks", 0.5),
            ("thank", 0.5),
            ("like", 0.3),
            ("enjoyed", 0.7),
            ("funny", 0.5),
            ("cool", 0.5),
            ("masterpiece", 1.0),
            ("perfect", 0.9),
            ("wow", 0.6),
        ];
        let negative = [
            ("hate", -0.9),
            ("hated", -0.9),
            ("awful", -0.9),
            ("terrible", -0.9),
            ("horrible", -0.9),
            ("bad", -0.6),
            ("worst", -0.9),
            ("boring", -0.6),
            ("stupid", -0.7),
            ("useless", -0.7),
            ("waste", -0.7),
            ("annoying", -0.6),
            ("dislike", -0.6),
            ("disappointed", -0.7),
            ("disappointing", -0.7),
            ("cringe", -0.6),
            ("clickbait", -0.7),
            ("sad", -0.4),
            ("wrong", -0.4),
            ("fake", -0.6),
            ("trash", -0.8),
            ("scam", -0.9),
        ];

        let words = positive.into_iter().chain(negative).collect();

        let negations = vec![
            "not", "no", "never", "cannot", "cant", "can't", "don't", "dont", "doesn't",
            "doesnt", "didn't", "didnt", "isn't", "isnt", "wasn't", "wasnt", "won't", "wont",
            "hardly", "barely",
        ];

        let intensifiers = [
            ("very", 1.5),
            ("really", 1.4),
            ("so", 1.3),
            ("extremely", 2.0),
            ("absolutely", 1.8),
            ("super", 1.5),
            ("slightly", 0.5),
            ("somewhat", 0.7),
        ]
        .into_iter()
        .collect();

        Self {
            words,
            negations,
            intensifiers,
        }
    }

    /// Mean word score in [-1, 1]. Zero when nothing matched.
    pub fn score(&self, text: &str) -> f32 {
        let mut scores = Vec::new();
        let mut negate_next = false;
        let mut intensifier = 1.0_f32;

        for raw in text.split_whitespace() {
            let word = normalize_word(raw);
            if word.is_empty() {
                continue;
            }

            if self.negations.iter().any(|n| *n == word) {
                negate_next = true;
                continue;
            }

            if let Some(mult) = self.intensifiers.get(word.as_str()) {
                intensifier = *mult;
                continue;
            }

            if let Some(base) = self.words.get(word.as_str()) {
                let mut score = *base * intensifier;
                if negate_next {
                    score = -score;
                }
                scores.push(score);
            }
            // Modifiers only apply to the next word.
            negate_next = false;
            intensifier = 1.0;
        }

        if scores.is_empty() {
            return 0.0;
        }
        (scores.iter().sum::<f32>() / scores.len() as f32).clamp(-1.0, 1.0)
    }
}

/// Lowercase and strip surrounding punctuation, keeping inner apostrophes.
fn normalize_word(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
        .trim_matches('\'')
        .to_lowercase()
}

#[async_trait::async_trait]
impl SentimentClassifier for LexiconClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, DomainError> {
        let score = self.score(text);
        let label = if score > 0.0 {
            POSITIVE_LABEL
        } else if score < 0.0 {
            NEGATIVE_LABEL
        } else {
            NEUTRAL_LABEL
        };
        Ok(Classification::new(label, score.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SentimentLabel;

    #[tokio::test]
    async fn test_love_and_hate() {
        let c = LexiconClassifier::new();
        let pos = c.classify("I love this!").await.unwrap();
        let neg = c.classify("I hate this.").await.unwrap();
        assert_eq!(pos.sentiment(), SentimentLabel::Positive);
        assert_eq!(neg.sentiment(), SentimentLabel::Negative);
    }

    #[tokio::test]
    async fn test_no_sentiment_words_is_neutral() {
        let c = LexiconClassifier::new();
        let result = c.classify("first comment from Berlin").await.unwrap();
        assert_eq!(result.label, NEUTRAL_LABEL);
        assert_eq!(result.sentiment(), SentimentLabel::Other);
    }

    #[test]
    fn test_negation_flips() {
        let c = LexiconClassifier::new();
        assert!(c.score("this is good") > 0.0);
        assert!(c.score("this is not good") < 0.0);
        assert!(c.score("don't hate it") > 0.0);
    }

    #[test]
    fn test_intensifier_scales() {
        let c = LexiconClassifier::new();
        assert!(c.score("very good") > c.score("good"));
        assert!(c.score("slightly good") < c.score("good"));
    }

    #[test]
    fn test_punctuation_and_case() {
        let c = LexiconClassifier::new();
        assert_eq!(c.score("GREAT!!!"), c.score("great"));
        assert_eq!(normalize_word("\"Can't,"), "can't");
    }

    #[test]
    fn test_score_is_bounded() {
        let c = LexiconClassifier::new();
        let s = c.score("extremely masterpiece");
        assert!((-1.0..=1.0).contains(&s));
    }
}
