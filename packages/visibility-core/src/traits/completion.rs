//! Text completion trait.

use async_trait::async_trait;

use crate::error::Result;

/// A hosted text-completion service.
///
/// Each call is a single-turn request carrying one user message and no
/// conversation history.
#[async_trait]
pub trait Completion: Send + Sync {
    /// Answer a single prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Model identifier, for logging.
    fn model(&self) -> &str {
        "unknown"
    }
}
