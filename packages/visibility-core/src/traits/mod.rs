//! Capability seams of the pipeline.
//!
//! The pipeline depends only on these traits, so the hosted completion
//! service, the sentiment model and the UI progress indicator can each be
//! swapped out (or mocked in tests) independently.

pub mod classifier;
pub mod completion;
pub mod progress;
