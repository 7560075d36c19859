//! Text Combiner component: derives the combined text column.
//!
//! `TEXT_SUMMARY` is the fixed-format concatenation of title, bullet points
//! and description with a literal `". "` separator. It is computed from the
//! source fields as they exist at combination time and is not kept in sync
//! afterwards. No truncation, no trimming.

use crate::error::Result;
use crate::schema::{self, TEXT_SUMMARY};
use polars::prelude::*;
use tracing::info;

/// Two-character separator between the concatenated fields.
const SEPARATOR: &str = ". ";

/// Derives the combined `TEXT_SUMMARY` column.
pub struct Combiner;

impl Combiner {
    /// Add `TEXT_SUMMARY = TITLE + ". " + BULLET_POINTS + ". " + DESCRIPTION`
    /// to the table. Non-string values render via ordinary text conversion;
    /// placeholders inserted by the cleaner render as themselves.
    ///
    /// # Errors
    ///
    /// [`PrepError::Schema`](crate::error::PrepError::Schema) naming the
    /// missing column(s) if any of the three source columns is absent.
    pub fn combine(&self, df: DataFrame) -> Result<DataFrame> {
        schema::require_columns(&df, &schema::text_columns())?;

        let combined = df
            .lazy()
            .with_column(
                concat_str(
                    [
                        col(schema::TITLE),
                        col(schema::BULLET_POINTS),
                        col(schema::DESCRIPTION),
                    ],
                    SEPARATOR,
                    false,
                )
                .alias(TEXT_SUMMARY),
            )
            .collect()?;

        info!(
            "Derived '{}' for {} rows",
            TEXT_SUMMARY,
            combined.height()
        );
        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn summaries(df: &DataFrame) -> Vec<Option<String>> {
        df.column(TEXT_SUMMARY)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect()
    }

    #[test]
    fn test_combine_concatenates_with_literal_separator() {
        let df = df!(
            schema::TITLE => ["No Title", "Lamp"],
            schema::BULLET_POINTS => ["x", "Bright. Warm"],
            schema::DESCRIPTION => ["y", "A desk lamp"],
        )
        .unwrap();

        let combined = Combiner.combine(df).unwrap();
        assert_eq!(
            summaries(&combined),
            vec![
                Some("No Title. x. y".to_string()),
                Some("Lamp. Bright. Warm. A desk lamp".to_string()),
            ]
        );
    }

    #[test]
    fn test_combine_renders_numeric_values_as_text() {
        let df = df!(
            schema::TITLE => [42i64],
            schema::BULLET_POINTS => ["points"],
            schema::DESCRIPTION => ["desc"],
        )
        .unwrap();

        let combined = Combiner.combine(df).unwrap();
        assert_eq!(summaries(&combined), vec![Some("42. points. desc".to_string())]);
    }

    #[test]
    fn test_combine_fails_without_description() {
        let df = df!(
            schema::TITLE => ["a"],
            schema::BULLET_POINTS => ["b"],
        )
        .unwrap();

        let err = Combiner.combine(df).unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains(schema::DESCRIPTION));
    }

    #[test]
    fn test_combine_keeps_existing_columns() {
        let df = df!(
            schema::TITLE => ["a"],
            schema::BULLET_POINTS => ["b"],
            schema::DESCRIPTION => ["c"],
            "PRODUCT_LENGTH" => [5.0f64],
        )
        .unwrap();

        let combined = Combiner.combine(df).unwrap();
        assert_eq!(combined.width(), 5);
        assert!(combined.column("PRODUCT_LENGTH").is_ok());
    }
}
