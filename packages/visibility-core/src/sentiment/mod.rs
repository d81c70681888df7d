//! Sentiment classifiers and the shared default instance.

mod lexicon;
mod openai;

pub use lexicon::{LexiconClassifier, LexiconScore};
pub use openai::{OpenAIClassifier, Polarity, SentimentVerdict};

use lazy_static::lazy_static;
use tracing::debug;

lazy_static! {
    static ref SHARED: LexiconClassifier = {
        debug!("Initializing shared lexicon classifier");
        LexiconClassifier::new()
    };
}

/// Process-wide default classifier, built on first use and reused after.
///
/// The instance holds only immutable word tables, so concurrent calls are
/// safe if the pipeline ever stops being sequential.
pub fn shared_classifier() -> &'static LexiconClassifier {
    &SHARED
}
