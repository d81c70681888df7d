//! LLM-backed sentiment classifier.
//!
//! Asks the chat model for a strict `{ "label": "POSITIVE" | "NEGATIVE" }`
//! verdict, so the output space matches the lexicon classifier.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::error::{Result, VisibilityError};
use crate::openai::OpenAIClient;
use crate::traits::classifier::SentimentClassifier;
use crate::types::{NEGATIVE, POSITIVE};

const SYSTEM_PROMPT: &str = "You are a sentiment classifier. Read the text and decide \
whether its overall tone is POSITIVE or NEGATIVE. Always pick one of the two labels.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn as_label(self) -> &'static str {
        match self {
            Polarity::Positive => POSITIVE,
            Polarity::Negative => NEGATIVE,
        }
    }
}

/// Structured reply expected from the model.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SentimentVerdict {
    pub label: Polarity,
}

/// Sentiment classifier that delegates to an OpenAI chat model.
#[derive(Clone)]
pub struct OpenAIClassifier {
    client: OpenAIClient,
}

impl OpenAIClassifier {
    pub fn new(client: OpenAIClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SentimentClassifier for OpenAIClassifier {
    async fn classify(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Err(VisibilityError::Classifier("cannot classify empty text".into()));
        }

        let verdict: SentimentVerdict = self
            .client
            .extract(SYSTEM_PROMPT, text)
            .await
            .map_err(|e| VisibilityError::Classifier(e.to_string()))?;

        Ok(verdict.label.as_label().to_string())
    }
}
