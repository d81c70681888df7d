//! Aggregate metrics over a result set.

use serde::Serialize;

use crate::types::{AnalysisRow, POSITIVE};

/// Rows shown in the detailed results view.
pub const PREVIEW_ROWS: usize = 100;

/// Share of one sentiment label across the result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentShare {
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

/// Summary metrics of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub visible: usize,

    /// Percentage of rows mentioning the brand
    pub visibility_rate: f64,

    /// One entry per observed label, most frequent first
    pub sentiment: Vec<SentimentShare>,
}

impl Summary {
    pub fn from_rows(rows: &[AnalysisRow]) -> Self {
        Self {
            total: rows.len(),
            visible: rows.iter().filter(|row| row.visible).count(),
            visibility_rate: visibility_rate(rows),
            sentiment: sentiment_distribution(rows),
        }
    }

    /// Percentage of a given label, if it was observed at all.
    pub fn share_of(&self, label: &str) -> Option<f64> {
        self.sentiment
            .iter()
            .find(|share| share.label == label)
            .map(|share| share.percent)
    }

    /// Percentage of `POSITIVE` rows; `None` when no row is positive.
    pub fn positive_share(&self) -> Option<f64> {
        self.share_of(POSITIVE)
    }
}

/// Percentage of rows whose answer mentions the brand; `0.0` when empty.
pub fn visibility_rate(rows: &[AnalysisRow]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let visible = rows.iter().filter(|row| row.visible).count();
    visible as f64 / rows.len() as f64 * 100.0
}

/// Percentage share of each observed sentiment label.
///
/// Sorted by count, most frequent first; equal counts keep the order in
/// which the labels first appeared.
pub fn sentiment_distribution(rows: &[AnalysisRow]) -> Vec<SentimentShare> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for row in rows {
        match counts.iter_mut().find(|(label, _)| *label == row.sentiment) {
            Some((_, count)) => *count += 1,
            None => counts.push((row.sentiment.clone(), 1)),
        }
    }

    // Stable sort keeps first-appearance order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = rows.len() as f64;
    counts
        .into_iter()
        .map(|(label, count)| SentimentShare {
            label,
            count,
            percent: count as f64 / total * 100.0,
        })
        .collect()
}

/// The rows shown in the detailed results view.
pub fn preview(rows: &[AnalysisRow]) -> &[AnalysisRow] {
    &rows[..rows.len().min(PREVIEW_ROWS)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NEGATIVE, NEUTRAL};

    fn row(visible: bool, sentiment: &str) -> AnalysisRow {
        AnalysisRow {
            query: "q".to_string(),
            visible,
            sentiment: sentiment.to_string(),
            urls: String::new(),
        }
    }

    #[test]
    fn test_visibility_rate() {
        let rows = vec![
            row(true, POSITIVE),
            row(false, POSITIVE),
            row(true, NEGATIVE),
            row(false, NEGATIVE),
        ];
        assert_eq!(visibility_rate(&rows), 50.0);
        assert_eq!(visibility_rate(&[]), 0.0);
        assert_eq!(visibility_rate(&[row(true, POSITIVE)]), 100.0);
    }

    #[test]
    fn test_distribution_sums_to_hundred() {
        let rows = vec![
            row(true, POSITIVE),
            row(false, NEGATIVE),
            row(true, POSITIVE),
            row(false, NEUTRAL),
            row(false, NEGATIVE),
            row(false, POSITIVE),
        ];
        let distribution = sentiment_distribution(&rows);

        let sum: f64 = distribution.iter().map(|s| s.percent).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert_eq!(distribution[0].label, POSITIVE);
        assert_eq!(distribution[0].count, 3);
        assert_eq!(distribution[1].label, NEGATIVE);
        assert_eq!(distribution[2].label, NEUTRAL);
    }

    #[test]
    fn test_distribution_ties_keep_first_appearance() {
        let rows = vec![row(false, NEGATIVE), row(false, POSITIVE)];
        let labels: Vec<String> = sentiment_distribution(&rows)
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, vec![NEGATIVE, POSITIVE]);
    }

    #[test]
    fn test_missing_positive_label_is_absent() {
        let rows = vec![row(false, NEGATIVE), row(true, NEGATIVE)];
        let summary = Summary::from_rows(&rows);

        assert_eq!(summary.positive_share(), None);
        assert_eq!(summary.share_of(NEGATIVE), Some(100.0));
        assert_eq!(summary.sentiment.len(), 1);
    }

    #[test]
    fn test_summary_counts() {
        let rows = vec![row(true, POSITIVE), row(false, NEGATIVE), row(false, POSITIVE)];
        let summary = Summary::from_rows(&rows);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.visible, 1);
        assert!((summary.visibility_rate - 100.0 / 3.0).abs() < 1e-9);
        assert!((summary.positive_share().unwrap() - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary() {
        let summary = Summary::from_rows(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.sentiment.is_empty());
        assert_eq!(summary.visibility_rate, 0.0);
    }

    #[test]
    fn test_preview_is_capped() {
        let rows: Vec<AnalysisRow> = (0..150).map(|_| row(false, POSITIVE)).collect();
        assert_eq!(preview(&rows).len(), PREVIEW_ROWS);
        assert_eq!(preview(&rows[..12]).len(), 12);
    }
}
