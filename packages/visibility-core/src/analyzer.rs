//! Per-answer analysis: brand visibility, sentiment and embedded links.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::traits::{classifier::SentimentClassifier, progress::Progress};
use crate::types::{AnalysisRow, ResultSet, NEUTRAL};

/// Characters of each answer passed to the sentiment classifier.
pub const SENTIMENT_WINDOW: usize = 512;

/// Separator between URLs in [`AnalysisRow::urls`].
pub const URL_SEPARATOR: &str = ";";

lazy_static! {
    // Scheme followed by any run of non-whitespace
    static ref URL_REGEX: Regex = Regex::new(r"https?://\S+").unwrap();
}

/// Case-insensitive substring test for the brand name.
pub fn is_visible(answer: &str, brand: &str) -> bool {
    answer.to_lowercase().contains(&brand.to_lowercase())
}

/// The leading slice of `answer` that the classifier sees.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn sentiment_window(answer: &str) -> &str {
    match answer.char_indices().nth(SENTIMENT_WINDOW) {
        Some((end, _)) => &answer[..end],
        None => answer,
    }
}

/// All URLs in `answer`, in order of appearance, joined with `;`.
pub fn extract_urls(answer: &str) -> String {
    URL_REGEX
        .find_iter(answer)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(URL_SEPARATOR)
}

/// Analyze one (query, answer) pair.
///
/// A classifier failure is recorded as [`NEUTRAL`] rather than dropping
/// the row.
pub async fn analyze_answer(
    query: &str,
    answer: &str,
    brand: &str,
    classifier: &dyn SentimentClassifier,
) -> AnalysisRow {
    let sentiment = match classifier.classify(sentiment_window(answer)).await {
        Ok(label) => label,
        Err(e) => {
            warn!(query = %query, error = %e, "Sentiment classification failed, recording neutral");
            NEUTRAL.to_string()
        }
    };

    AnalysisRow {
        query: query.to_string(),
        visible: is_visible(answer, brand),
        sentiment,
        urls: extract_urls(answer),
    }
}

/// Analyze parallel sequences of queries and answers.
///
/// Pairs are matched by position. Fetcher error placeholders are analyzed
/// as ordinary text.
pub async fn analyze(
    queries: &[String],
    answers: &[String],
    brand: &str,
    classifier: &dyn SentimentClassifier,
    progress: Option<&dyn Progress>,
) -> ResultSet {
    let total = queries.len().min(answers.len());
    let mut rows = Vec::with_capacity(total);

    for (query, answer) in queries.iter().zip(answers) {
        rows.push(analyze_answer(query, answer, brand, classifier).await);

        if let Some(progress) = progress {
            progress.advance(rows.len(), total);
        }
    }

    let visible = rows.iter().filter(|row| row.visible).count();
    info!(rows = rows.len(), visible, "Analysis complete");

    rows
}
