//! Deterministic extractive fallback summarizer.
//!
//! Keeps the pipeline runnable without a model backend: the "summary" is
//! simply the leading words of the input, up to the requested maximum. Real
//! abstractive summarization belongs behind the
//! [`Summarizer`](super::Summarizer) trait in an external backend.

use super::Summarizer;

/// Summarizer that truncates to the first `max_words` words.
pub struct ExtractiveSummarizer;

impl Summarizer for ExtractiveSummarizer {
    fn summarize(&self, text: &str, max_words: usize, _min_words: usize) -> anyhow::Result<String> {
        if text.trim().is_empty() {
            anyhow::bail!("empty input text");
        }

        Ok(text
            .split_whitespace()
            .take(max_words)
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn name(&self) -> &str {
        "extractive"
    }
}
