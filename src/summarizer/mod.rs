//! Summarizer boundary: opaque text shortening over the combined column.
//!
//! The actual summarization model (e.g. a pretrained seq2seq model served
//! elsewhere) sits behind the [`Summarizer`] trait; this crate only
//! orchestrates it. Calls run strictly sequentially, one row at a time, and
//! a slow call blocks the batch; there is no batching, no concurrency and
//! no timeout here. A failing call is the single locally-recovered error in
//! the crate: it is logged and recorded as an empty string so the batch
//! always completes.
//!
//! # Implementing a Summarizer
//!
//! ```rust,ignore
//! use catalog_prep::summarizer::Summarizer;
//!
//! struct ModelBackedSummarizer { /* client handle */ }
//!
//! impl Summarizer for ModelBackedSummarizer {
//!     fn summarize(&self, text: &str, max_words: usize, min_words: usize)
//!         -> anyhow::Result<String> {
//!         // call the model, return the shortened text
//!         # unimplemented!()
//!     }
//!     fn name(&self) -> &str { "bart-large-cnn" }
//! }
//! ```

mod extractive;

pub use extractive::ExtractiveSummarizer;

use crate::error::Result;
use crate::schema::{self, CLEAN_SUMMARY, TEXT_SUMMARY};
use polars::prelude::*;
use tracing::{debug, error, info, warn};

/// Trait for text summarization backends.
///
/// Implementations must be `Send + Sync`. Per-call latency and failure modes
/// are outside this crate's control; the orchestration in
/// [`summarize_column`] tolerates individual failures.
pub trait Summarizer: Send + Sync {
    /// Shorten `text` to roughly between `min_words` and `max_words` words.
    fn summarize(&self, text: &str, max_words: usize, min_words: usize) -> anyhow::Result<String>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Length bounds for one input: `max = clamp(words / 2, 10, 150)` and
/// `min = max(10, max / 2)`.
pub fn length_bounds(text: &str) -> (usize, usize) {
    let words = text.split_whitespace().count();
    let max_words = (words / 2).clamp(10, 150);
    let min_words = (max_words / 2).max(10);
    (max_words, min_words)
}

/// Summarize every row of the `TEXT_SUMMARY` column, adding the result as
/// the `clean_summary` column. Returns the augmented table and the number of
/// rows that failed (each recorded as an empty string).
///
/// A null input counts as a failed row; it cannot be summarized but must not
/// abort the batch.
///
/// # Errors
///
/// [`PrepError::Schema`](crate::error::PrepError::Schema) if the
/// `TEXT_SUMMARY` column is absent. Row-level summarizer failures are *not*
/// errors.
pub fn summarize_column(
    mut df: DataFrame,
    summarizer: &dyn Summarizer,
) -> Result<(DataFrame, usize)> {
    schema::require_columns(&df, &[TEXT_SUMMARY])?;

    let height = df.height();
    info!(
        "Summarizing {} rows with backend '{}'",
        height,
        summarizer.name()
    );

    let texts = df
        .column(TEXT_SUMMARY)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let texts = texts.str()?;

    let mut summaries: Vec<String> = Vec::with_capacity(height);
    let mut failures = 0usize;

    for (row, text) in texts.into_iter().enumerate() {
        match text {
            Some(text) => {
                let (max_words, min_words) = length_bounds(text);
                match summarizer.summarize(text, max_words, min_words) {
                    Ok(summary) => summaries.push(summary),
                    Err(e) => {
                        error!("Error summarizing row {}: {}", row, e);
                        failures += 1;
                        summaries.push(String::new());
                    }
                }
            }
            None => {
                warn!("Row {} has no text to summarize", row);
                failures += 1;
                summaries.push(String::new());
            }
        }

        if (row + 1) % 500 == 0 {
            debug!("Summarized {}/{} rows", row + 1, height);
        }
    }

    df.with_column(Series::new(CLEAN_SUMMARY.into(), summaries))?;
    info!(
        "Summarization complete: {} rows, {} failures",
        height, failures
    );

    Ok((df, failures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Backend that fails on any text containing "bad".
    struct FlakySummarizer;

    impl Summarizer for FlakySummarizer {
        fn summarize(
            &self,
            text: &str,
            max_words: usize,
            _min_words: usize,
        ) -> anyhow::Result<String> {
            if text.contains("bad") {
                anyhow::bail!("backend rejected input");
            }
            Ok(text
                .split_whitespace()
                .take(max_words)
                .collect::<Vec<_>>()
                .join(" "))
        }

        fn name(&self) -> &str {
            "flaky"
        }
    }

    fn clean_summaries(df: &DataFrame) -> Vec<String> {
        df.column(CLEAN_SUMMARY)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_length_bounds_short_text() {
        // 4 words: max clamps up to 10, min stays 10.
        assert_eq!(length_bounds("one two three four"), (10, 10));
    }

    #[test]
    fn test_length_bounds_mid_text() {
        let text = vec!["w"; 60].join(" ");
        assert_eq!(length_bounds(&text), (30, 15));
    }

    #[test]
    fn test_length_bounds_long_text_caps_at_150() {
        let text = vec!["w"; 1000].join(" ");
        assert_eq!(length_bounds(&text), (150, 75));
    }

    #[test]
    fn test_summarize_column_adds_clean_summary() {
        let df = df!(TEXT_SUMMARY => ["a few words here", "more words over there"]).unwrap();
        let (out, failures) = summarize_column(df, &FlakySummarizer).unwrap();

        assert_eq!(failures, 0);
        assert_eq!(out.column(CLEAN_SUMMARY).unwrap().null_count(), 0);
        assert_eq!(
            clean_summaries(&out),
            vec![
                "a few words here".to_string(),
                "more words over there".to_string(),
            ]
        );
    }

    #[test]
    fn test_row_failures_do_not_abort_batch() {
        let df = df!(
            TEXT_SUMMARY => [Some("good text one"), Some("bad text"), None, Some("good text two")],
        )
        .unwrap();
        let (out, failures) = summarize_column(df, &FlakySummarizer).unwrap();

        assert_eq!(failures, 2);
        let summaries = clean_summaries(&out);
        assert_eq!(out.height(), 4);
        assert_eq!(summaries[1], "");
        assert_eq!(summaries[2], "");
        assert!(!summaries[0].is_empty());
        assert!(!summaries[3].is_empty());
    }

    #[test]
    fn test_summarize_column_requires_text_summary() {
        let df = df!("TITLE" => ["a"]).unwrap();
        let err = summarize_column(df, &FlakySummarizer).unwrap_err();
        assert!(err.is_schema());
    }
}
