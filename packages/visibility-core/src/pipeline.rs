//! The end-to-end visibility run.
//!
//! Stages run strictly one after another: generate every query, fetch
//! every answer, analyze every pair. Nothing here touches a UI; callers
//! observe progress through the optional [`Progress`] hooks.

use tracing::info;

use crate::analyzer;
use crate::fetcher;
use crate::queries;
use crate::report::Summary;
use crate::traits::{classifier::SentimentClassifier, completion::Completion, progress::Progress};
use crate::types::{BrandProfile, QueryCount, ResultSet};

/// Everything produced by one run, kept for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub profile: BrandProfile,
    pub queries: Vec<String>,
    pub answers: Vec<String>,
    pub rows: ResultSet,
}

impl AnalysisRun {
    pub fn summary(&self) -> Summary {
        Summary::from_rows(&self.rows)
    }
}

/// Pipeline wired to a completion service and a sentiment classifier.
pub struct VisibilityPipeline<'a> {
    completion: &'a dyn Completion,
    classifier: &'a dyn SentimentClassifier,
}

impl<'a> VisibilityPipeline<'a> {
    pub fn new(completion: &'a dyn Completion, classifier: &'a dyn SentimentClassifier) -> Self {
        Self {
            completion,
            classifier,
        }
    }

    /// Stage 1: build the query list.
    pub fn generate(&self, profile: &BrandProfile, count: QueryCount) -> Vec<String> {
        queries::generate_for_profile(profile, count.get())
    }

    /// Stage 2: fetch one answer per query.
    pub async fn fetch(&self, queries: &[String], progress: Option<&dyn Progress>) -> Vec<String> {
        fetcher::run_queries(queries, self.completion, progress).await
    }

    /// Stage 3: analyze each (query, answer) pair.
    pub async fn analyze(
        &self,
        queries: &[String],
        answers: &[String],
        brand: &str,
        progress: Option<&dyn Progress>,
    ) -> ResultSet {
        analyzer::analyze(queries, answers, brand, self.classifier, progress).await
    }

    /// Run all three stages.
    ///
    /// `progress` observes the fetch loop, the only slow stage.
    pub async fn run(
        &self,
        profile: &BrandProfile,
        count: QueryCount,
        progress: Option<&dyn Progress>,
    ) -> AnalysisRun {
        let queries = self.generate(profile, count);
        info!(brand = %profile.brand, queries = queries.len(), "Generated queries");

        let answers = self.fetch(&queries, progress).await;
        let rows = self.analyze(&queries, &answers, &profile.brand, None).await;

        AnalysisRun {
            profile: profile.clone(),
            queries,
            answers,
            rows,
        }
    }
}
