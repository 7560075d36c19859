//! Catalog Preparation Pipeline Library
//!
//! A Polars-based preparation pipeline for product catalog data.
//!
//! # Overview
//!
//! This library turns a raw catalog export into model-ready artifacts:
//!
//! - **Loading**: CSV parsing, schema validation and identifier removal
//! - **Cleaning**: Placeholder filling for missing text fields
//! - **Combining**: A derived `TEXT_SUMMARY` column from the text fields
//! - **Publishing**: A wholesale-overwritten staging snapshot plus previews
//! - **Stratified Sampling**: Class-proportional sampling by product type
//! - **Summarization**: Optional shortening of the combined text through a
//!   pluggable backend
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use catalog_prep::{Pipeline, PrepConfig};
//! use std::path::Path;
//!
//! let config = PrepConfig::builder()
//!     .staging_dir("Data/Staging")
//!     .preview_rows(20)
//!     .seed(42)
//!     .build()?;
//!
//! let pipeline = Pipeline::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?;
//!
//! // Load, clean, combine and stage the snapshot.
//! let report = pipeline.prepare(Path::new("train.csv"))?;
//! println!("Staged {} rows in {}ms", report.staged_shape.0, report.duration_ms);
//!
//! // Draw a class-proportional sample from what was staged.
//! let sample = pipeline.sample_staging("PRODUCT_TYPE_ID", 10_000)?;
//! ```
//!
//! # Summarization Backends
//!
//! Abstractive summarization is served outside this crate; plug a backend in
//! through the [`summarizer::Summarizer`] trait. The bundled
//! [`summarizer::ExtractiveSummarizer`] is a deterministic fallback that
//! truncates instead of paraphrasing.

pub mod cleaner;
pub mod combiner;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod publisher;
pub mod sampler;
pub mod schema;
pub mod summarizer;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::Cleaner;
pub use combiner::Combiner;
pub use config::{ConfigValidationError, PrepConfig, PrepConfigBuilder};
pub use error::{PrepError, Result as PrepResult, ResultExt};
pub use loader::{LoadOutcome, Loader};
pub use pipeline::{
    ClosureProgressReporter, Pipeline, PipelineBuilder, PrepStage, ProgressReporter,
    ProgressUpdate,
};
pub use publisher::Publisher;
pub use sampler::stratified_sample;
pub use summarizer::{ExtractiveSummarizer, Summarizer, summarize_column};
pub use types::{CleanReport, ColumnMissing, PrepReport};
