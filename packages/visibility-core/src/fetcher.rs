//! Sequential answer fetching against a completion service.

use std::time::Instant;
use tracing::{debug, info, warn};

use crate::traits::{completion::Completion, progress::Progress};

/// Prefix of the placeholder answer recorded for a failed call.
pub const ERROR_PREFIX: &str = "Error: ";

/// Placeholder answer for a failed completion call.
pub fn error_placeholder(error: impl std::fmt::Display) -> String {
    format!("{ERROR_PREFIX}{error}")
}

/// Whether an answer is a fetch-failure placeholder.
pub fn is_error_placeholder(answer: &str) -> bool {
    answer.starts_with(ERROR_PREFIX)
}

/// Ask the completion service every query, one at a time.
///
/// The output has the same length and order as `queries`. A failed
/// call becomes an `Error: <details>` answer at its own index and the
/// remaining queries still run.
pub async fn run_queries(
    queries: &[String],
    completion: &dyn Completion,
    progress: Option<&dyn Progress>,
) -> Vec<String> {
    let total = queries.len();
    let start = Instant::now();
    let mut answers = Vec::with_capacity(total);
    let mut failures = 0usize;

    for (index, query) in queries.iter().enumerate() {
        let answer = match completion.complete(query).await {
            Ok(text) => text,
            Err(e) => {
                warn!(index, query = %query, error = %e, "Completion failed");
                failures += 1;
                error_placeholder(e)
            }
        };
        debug!(index, chars = answer.chars().count(), "Answer received");
        answers.push(answer);

        if let Some(progress) = progress {
            progress.advance(index + 1, total);
        }
    }

    info!(
        model = completion.model(),
        queries = total,
        failures,
        duration_ms = start.elapsed().as_millis(),
        "Fetched answers"
    );

    answers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VisibilityError;
    use crate::testing::MockCompletion;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn queries(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("query {i}")).collect()
    }

    #[tokio::test]
    async fn test_answers_match_query_positions() {
        let completion = MockCompletion::echo();
        let queries = queries(7);

        let answers = run_queries(&queries, &completion, None).await;

        assert_eq!(answers.len(), queries.len());
        for (query, answer) in queries.iter().zip(&answers) {
            assert_eq!(answer, &format!("answer to {query}"));
        }
    }

    #[tokio::test]
    async fn test_failure_is_isolated_to_its_row() {
        let completion = MockCompletion::echo()
            .with_failure("query 1", VisibilityError::Api("quota exceeded".into()));
        let queries = queries(3);

        let answers = run_queries(&queries, &completion, None).await;

        assert_eq!(answers[0], "answer to query 0");
        assert_eq!(answers[1], "Error: API error: quota exceeded");
        assert_eq!(answers[2], "answer to query 2");
        assert!(is_error_placeholder(&answers[1]));
        assert!(!is_error_placeholder(&answers[0]));
    }

    #[tokio::test]
    async fn test_every_query_is_sent_once_in_order() {
        let completion = MockCompletion::echo();
        let queries = queries(4);

        run_queries(&queries, &completion, None).await;

        assert_eq!(completion.prompts(), queries);
    }

    #[tokio::test]
    async fn test_progress_after_each_call() {
        let completion = MockCompletion::echo()
            .with_failure("query 0", VisibilityError::Network("timeout".into()));
        let calls = AtomicUsize::new(0);
        let progress = |done: usize, total: usize| {
            assert_eq!(total, 5);
            assert_eq!(done, calls.fetch_add(1, Ordering::SeqCst) + 1);
        };

        run_queries(&queries(5), &completion, Some(&progress)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let completion = MockCompletion::echo();
        let answers = run_queries(&[], &completion, None).await;
        assert!(answers.is_empty());
        assert!(completion.prompts().is_empty());
    }
}
