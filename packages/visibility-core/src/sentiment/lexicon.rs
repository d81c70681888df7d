//! Keyword-lexicon sentiment classifier.
//!
//! A local two-class model: counts favourable and unfavourable words
//! (flipping a word's polarity within a few words after a negator) and
//! labels the text `POSITIVE` or `NEGATIVE`. No network, no model files.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::error::Result;
use crate::traits::classifier::SentimentClassifier;
use crate::types::{NEGATIVE, POSITIVE};

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic", "superb",
    "outstanding", "brilliant", "love", "loved", "loving", "best", "better",
    "positive", "happy", "joy", "beautiful", "perfect", "awesome", "incredible",
    "delightful", "pleasant", "satisfying", "satisfied", "recommend", "recommended",
    "impressive", "exceptional", "remarkable", "success", "successful", "popular",
    "efficient", "effective", "helpful", "reliable", "trustworthy", "trusted",
    "quality", "valuable", "beneficial", "favorable", "safe", "safer", "fresh",
    "natural", "sustainable", "eco", "affordable", "convenient",
    "long-lasting", "lasting", "gentle", "clean", "top", "leading", "well",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "poor", "worst", "worse", "hate",
    "hated", "dislike", "disappointing", "disappointed", "failure", "failed",
    "fail", "negative", "sad", "unhappy", "angry", "annoyed", "frustrated",
    "frustrating", "problem", "problems", "issue", "issues", "broken", "error",
    "errors", "mistake", "wrong", "incorrect", "useless", "waste", "scam",
    "fraud", "fake", "unreliable", "unsafe", "toxic", "harmful", "hazardous",
    "irritation", "irritating", "allergic", "allergies", "risk", "risks",
    "dangerous", "expensive", "overpriced", "worthless", "mediocre", "inferior",
    "chemicals", "concerns", "unable", "sorry", "unfortunately",
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "without", "hardly", "cannot", "isn't", "aren't",
    "wasn't", "weren't", "don't", "doesn't", "didn't", "won't", "can't",
];

/// Words after a negator whose polarity is flipped.
const NEGATION_SCOPE: usize = 3;

/// Lexicon-backed two-class sentiment classifier.
#[derive(Debug, Clone)]
pub struct LexiconClassifier {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
    negators: HashSet<&'static str>,
}

/// Word counts behind a lexicon verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexiconScore {
    pub positive: usize,
    pub negative: usize,
}

impl LexiconScore {
    /// Ties, including text with no sentiment words, lean positive.
    pub fn label(&self) -> &'static str {
        if self.negative > self.positive {
            NEGATIVE
        } else {
            POSITIVE
        }
    }
}

impl LexiconClassifier {
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
            negators: NEGATORS.iter().copied().collect(),
        }
    }

    pub fn score(&self, text: &str) -> LexiconScore {
        let lowercase = text.to_lowercase().replace('\u{2019}', "'");
        let words = lowercase
            .split(|c: char| !(c.is_alphabetic() || c == '-' || c == '\''))
            .map(|w| w.trim_matches(|c: char| c == '-' || c == '\''))
            .filter(|w| !w.is_empty());

        let mut score = LexiconScore::default();
        let mut negation_left = 0usize;

        for word in words {
            if self.negators.contains(word) {
                negation_left = NEGATION_SCOPE;
                continue;
            }
            let negated = negation_left > 0;
            negation_left = negation_left.saturating_sub(1);

            let polarity = if self.positive.contains(word) {
                Some(true)
            } else if self.negative.contains(word) {
                Some(false)
            } else {
                None
            };

            match polarity {
                Some(is_positive) if is_positive != negated => score.positive += 1,
                Some(_) => score.negative += 1,
                None => {}
            }
        }

        score
    }

    pub fn label(&self, text: &str) -> &'static str {
        self.score(text).label()
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentimentClassifier for LexiconClassifier {
    async fn classify(&self, text: &str) -> Result<String> {
        Ok(self.label(text).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text() {
        let classifier = LexiconClassifier::new();
        let text = "Glade is a great, reliable brand. Many reviewers recommend its candles.";
        assert_eq!(classifier.label(text), POSITIVE);
    }

    #[test]
    fn test_negative_text() {
        let classifier = LexiconClassifier::new();
        let text = "Some users report irritation and allergies; the chemicals raise concerns.";
        assert_eq!(classifier.label(text), NEGATIVE);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let classifier = LexiconClassifier::new();
        let score = classifier.score("This is not safe and not good.");
        assert_eq!(score, LexiconScore { positive: 0, negative: 2 });
        assert_eq!(score.label(), NEGATIVE);

        let score = classifier.score("It is never toxic.");
        assert_eq!(score.positive, 1);
    }

    #[test]
    fn test_contraction_negation() {
        let classifier = LexiconClassifier::new();
        assert_eq!(classifier.label("It isn't good."), NEGATIVE);
        assert_eq!(classifier.label("It doesn\u{2019}t work well."), NEGATIVE);
    }

    #[test]
    fn test_ties_and_empty_text_lean_positive() {
        let classifier = LexiconClassifier::new();
        assert_eq!(classifier.label(""), POSITIVE);
        assert_eq!(classifier.label("The item arrived on Tuesday."), POSITIVE);
        assert_eq!(classifier.label("good but expensive"), POSITIVE);
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = LexiconClassifier::new();
        assert_eq!(classifier.label("TERRIBLE. AWFUL."), NEGATIVE);
    }

    #[test]
    fn test_hyphenated_words() {
        let classifier = LexiconClassifier::new();
        assert_eq!(classifier.score("a long-lasting scent").positive, 1);
    }

    #[tokio::test]
    async fn test_classify_trait() {
        let classifier = LexiconClassifier::new();
        let label = classifier.classify("an awful, harmful product").await.unwrap();
        assert_eq!(label, "NEGATIVE");
    }
}
