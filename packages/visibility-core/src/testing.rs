//! Testing utilities including mock implementations.
//!
//! Useful for exercising the pipeline without making real completion or
//! classifier calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, RwLock};

use crate::error::{Result, VisibilityError};
use crate::traits::{classifier::SentimentClassifier, completion::Completion};
use crate::types::POSITIVE;

/// Reproduce a stored error for every matching call.
fn replay(error: &VisibilityError) -> VisibilityError {
    match error {
        VisibilityError::Config(m) => VisibilityError::Config(m.clone()),
        VisibilityError::Validation(m) => VisibilityError::Validation(m.clone()),
        VisibilityError::Network(m) => VisibilityError::Network(m.clone()),
        VisibilityError::Api(m) => VisibilityError::Api(m.clone()),
        VisibilityError::Parse(m) => VisibilityError::Parse(m.clone()),
        VisibilityError::Classifier(m) => VisibilityError::Classifier(m.clone()),
        VisibilityError::Export(e) => {
            VisibilityError::Export(io::Error::new(e.kind(), e.to_string()))
        }
    }
}

/// A mock completion service.
///
/// By default answers every prompt with `answer to <prompt>`. Specific
/// prompts can be given fixed answers or made to fail.
#[derive(Default, Clone)]
pub struct MockCompletion {
    /// Predefined answers by prompt
    responses: Arc<RwLock<HashMap<String, String>>>,

    /// Predefined failures by prompt
    failures: Arc<RwLock<HashMap<String, VisibilityError>>>,

    /// Answer for prompts with nothing predefined; `None` echoes
    fallback: Option<String>,

    /// Prompts received, in call order
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockCompletion {
    /// Answer every prompt with `answer to <prompt>`.
    pub fn echo() -> Self {
        Self::default()
    }

    /// Answer every prompt with the same text.
    pub fn constant(answer: impl Into<String>) -> Self {
        Self {
            fallback: Some(answer.into()),
            ..Default::default()
        }
    }

    pub fn with_response(self, prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(prompt.into(), answer.into());
        self
    }

    pub fn with_failure(self, prompt: impl Into<String>, error: VisibilityError) -> Self {
        self.failures.write().unwrap().insert(prompt.into(), error);
        self
    }

    /// Prompts received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }
}

#[async_trait]
impl Completion for MockCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.write().unwrap().push(prompt.to_string());

        if let Some(error) = self.failures.read().unwrap().get(prompt) {
            return Err(replay(error));
        }
        if let Some(answer) = self.responses.read().unwrap().get(prompt) {
            return Ok(answer.clone());
        }

        Ok(self
            .fallback
            .clone()
            .unwrap_or_else(|| format!("answer to {prompt}")))
    }

    fn model(&self) -> &str {
        "mock"
    }
}

/// A mock sentiment classifier.
///
/// Returns `POSITIVE` unless a label or failure was predefined for the
/// exact text it receives.
#[derive(Clone)]
pub struct MockClassifier {
    labels: Arc<RwLock<HashMap<String, String>>>,
    failures: Arc<RwLock<HashMap<String, VisibilityError>>>,
    default_label: String,
    seen: Arc<RwLock<Vec<String>>>,
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self {
            labels: Arc::default(),
            failures: Arc::default(),
            default_label: POSITIVE.to_string(),
            seen: Arc::default(),
        }
    }
}

impl MockClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = label.into();
        self
    }

    pub fn with_label(self, text: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.write().unwrap().insert(text.into(), label.into());
        self
    }

    pub fn with_failure(self, text: impl Into<String>, error: VisibilityError) -> Self {
        self.failures.write().unwrap().insert(text.into(), error);
        self
    }

    /// Texts classified so far, in order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.read().unwrap().clone()
    }

    /// Character counts of the texts classified so far.
    pub fn seen_lengths(&self) -> Vec<usize> {
        self.seen
            .read()
            .unwrap()
            .iter()
            .map(|text| text.chars().count())
            .collect()
    }
}

#[async_trait]
impl SentimentClassifier for MockClassifier {
    async fn classify(&self, text: &str) -> Result<String> {
        self.seen.write().unwrap().push(text.to_string());

        if let Some(error) = self.failures.read().unwrap().get(text) {
            return Err(replay(error));
        }

        Ok(self
            .labels
            .read()
            .unwrap()
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.default_label.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_completion_records_calls() {
        let completion = MockCompletion::echo()
            .with_response("a", "fixed")
            .with_failure("b", VisibilityError::Network("down".into()));

        assert_eq!(completion.complete("a").await.unwrap(), "fixed");
        assert!(completion.complete("b").await.is_err());
        assert!(completion.complete("b").await.is_err());
        assert_eq!(completion.complete("c").await.unwrap(), "answer to c");
        assert_eq!(completion.prompts(), vec!["a", "b", "b", "c"]);
    }

    #[tokio::test]
    async fn test_constant_completion() {
        let completion = MockCompletion::constant("same");
        assert_eq!(completion.complete("x").await.unwrap(), "same");
    }

    #[tokio::test]
    async fn test_mock_classifier_labels() {
        let classifier = MockClassifier::new()
            .with_default_label("NEGATIVE")
            .with_label("lovely", "POSITIVE");

        assert_eq!(classifier.classify("lovely").await.unwrap(), "POSITIVE");
        assert_eq!(classifier.classify("other").await.unwrap(), "NEGATIVE");
        assert_eq!(classifier.seen(), vec!["lovely", "other"]);
    }
}
