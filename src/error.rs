//! Custom error types for the catalog preparation pipeline.
//!
//! This module provides the error taxonomy using `thiserror`. Errors from the
//! loader, cleaner, combiner, publisher and sampler are never retried
//! internally; they propagate to the caller, which decides whether to retry
//! or abort the batch run. The only locally-recovered failure in the crate is
//! a per-row summarizer error (see [`crate::summarizer`]).

use thiserror::Error;

/// The main error type for the preparation pipeline.
#[derive(Error, Debug)]
pub enum PrepError {
    /// Input path does not exist. Checked explicitly before any read is
    /// attempted, never inferred from a read failure.
    #[error("input file not found: {0}")]
    NotFound(String),

    /// The input file could not be parsed into a table.
    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: polars::error::PolarsError,
    },

    /// One or more required columns are absent from the table.
    #[error("required column(s) missing: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// An output file or the staging directory could not be written.
    #[error("failed to write '{path}': {reason}")]
    Write { path: String, reason: String },

    /// A requested sample size exceeds the rows available to draw from.
    #[error("sample size {requested} exceeds available rows {available} for '{group}'")]
    SampleSize {
        group: String,
        requested: usize,
        available: usize,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PrepError>,
    },
}

impl PrepError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PrepError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable code for log labelling and exit reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Parse { .. } => "PARSE_ERROR",
            Self::Schema { .. } => "SCHEMA_ERROR",
            Self::Write { .. } => "WRITE_ERROR",
            Self::SampleSize { .. } => "SAMPLE_SIZE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is a schema violation.
    pub fn is_schema(&self) -> bool {
        match self {
            Self::Schema { .. } => true,
            Self::WithContext { source, .. } => source.is_schema(),
            _ => false,
        }
    }
}

/// Result type alias for preparation operations.
pub type Result<T> = std::result::Result<T, PrepError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| PrepError::Polars(e).with_context(context))
    }
}
