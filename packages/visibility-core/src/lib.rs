//! Search Visibility Agent
//!
//! Estimates how visible a brand is in AI-generated answers to plausible
//! search queries, and tags each answer's sentiment.
//!
//! # Pipeline
//!
//! 1. [`queries`] - expand five templates into N search-style queries
//! 2. [`fetcher`] - ask a completion service each query, sequentially
//! 3. [`analyzer`] - brand mention, sentiment label and URLs per answer
//! 4. [`report`] / [`export`] - visibility rate, sentiment shares, CSV
//!
//! # Usage
//!
//! ```rust,ignore
//! use visibility_core::{
//!     sentiment::shared_classifier, BrandProfile, Config, OpenAIClient, QueryCount,
//!     VisibilityPipeline,
//! };
//!
//! let client = OpenAIClient::from_config(&Config::from_env()?);
//! let pipeline = VisibilityPipeline::new(&client, shared_classifier());
//!
//! let run = pipeline
//!     .run(&BrandProfile::default(), QueryCount::new(20)?, None)
//!     .await;
//! println!("{:.1}% visible", run.summary().visibility_rate);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Completion, classifier and progress seams
//! - [`openai`] - OpenAI chat completions client
//! - [`sentiment`] - Lexicon and LLM-backed classifiers
//! - [`testing`] - Mock implementations for testing

pub mod analyzer;
pub mod config;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod openai;
pub mod pipeline;
pub mod queries;
pub mod report;
pub mod security;
pub mod sentiment;
pub mod testing;
pub mod traits;
pub mod types;

pub use config::Config;
pub use error::{Result, VisibilityError};
pub use openai::OpenAIClient;
pub use pipeline::{AnalysisRun, VisibilityPipeline};
pub use queries::generate_queries;
pub use report::{SentimentShare, Summary};
pub use traits::{classifier::SentimentClassifier, completion::Completion, progress::Progress};
pub use types::{AnalysisRow, BrandProfile, QueryCount, ResultSet, NEGATIVE, NEUTRAL, POSITIVE};
