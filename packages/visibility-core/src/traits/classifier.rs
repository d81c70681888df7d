//! Sentiment classification trait.

use async_trait::async_trait;

use crate::error::Result;

/// A two-class sentiment model: `classify(text) -> label`.
///
/// The returned label is recorded verbatim on the analysis row.
/// Implementations must tolerate repeated sequential calls on the same
/// instance.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<String>;
}
