//! Progress reporting for the preparation pipeline.
//!
//! The pipeline is strictly sequential with no cancellation or timeouts, but
//! each stage reports what it is doing so long runs (notably the summarizer
//! loop) stay observable.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_prep::Pipeline;
//!
//! let pipeline = Pipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the preparation pipeline.
///
/// Sampling and summarizing are independent flows that run after the main
/// load-to-publish chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrepStage {
    /// Reading and validating the source file
    Loading,
    /// Filling missing text fields with placeholders
    Cleaning,
    /// Deriving the combined text column
    Combining,
    /// Writing the staged snapshot and its preview
    Publishing,
    /// Drawing the stratified sample from the staged snapshot
    Sampling,
    /// Running the summarizer over the combined text
    Summarizing,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline failed with an error
    Failed,
}

impl PrepStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Data",
            Self::Cleaning => "Cleaning Text Fields",
            Self::Combining => "Combining Text",
            Self::Publishing => "Publishing to Staging",
            Self::Sampling => "Stratified Sampling",
            Self::Summarizing => "Summarizing",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Returns the typical weight of this stage in the overall pipeline
    /// (0.0 - 1.0). The main-chain weights sum to ~1.0.
    pub fn weight(&self) -> f32 {
        match self {
            Self::Loading => 0.25,
            Self::Cleaning => 0.15,
            Self::Combining => 0.15,
            Self::Publishing => 0.15,
            Self::Sampling => 0.15,
            Self::Summarizing => 0.15,
            Self::Complete => 0.0,
            Self::Failed => 0.0,
        }
    }

    /// Returns the cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Loading => 0.0,
            Self::Cleaning => 0.25,
            Self::Combining => 0.40,
            Self::Publishing => 0.55,
            Self::Sampling => 0.70,
            Self::Summarizing => 0.85,
            Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// A single progress update from the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current pipeline stage
    pub stage: PrepStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Progress within current stage (0.0 - 1.0)
    pub stage_progress: f32,

    /// Human-readable message describing current activity
    pub message: String,
}

impl ProgressUpdate {
    /// Creates a new progress update for a stage.
    pub fn new(stage: PrepStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            stage_progress: stage_progress.clamp(0.0, 1.0),
            message: message.into(),
        }
    }

    /// Creates a completion progress update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: PrepStage::Complete,
            progress: 1.0,
            stage_progress: 1.0,
            message: message.into(),
        }
    }

    /// Creates a failed progress update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: PrepStage::Failed,
            progress: 0.0,
            stage_progress: 0.0,
            message: message.into(),
        }
    }
}

/// Trait for receiving progress updates during preparation.
///
/// Implementations must be `Send + Sync`; updates may be emitted frequently
/// and should be handled without blocking.
pub trait ProgressReporter: Send + Sync {
    /// Called when progress is made during preparation.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);
