//! Cleaner component: fills missing text fields with fixed placeholders.
//!
//! Exactly three columns are touched (title, bullet points and description),
//! each filled with its placeholder from [`crate::schema::TEXT_FILLS`]. Every
//! other column keeps its values and its missing entries. Missing-value
//! percentages are measured before and after the fill and reported for
//! observability only.

use crate::error::Result;
use crate::schema;
use crate::types::{CleanReport, ColumnMissing};
use crate::utils::missing_percentages;
use polars::prelude::*;
use tracing::info;

/// Fills missing values in the designated text columns.
pub struct Cleaner;

impl Cleaner {
    /// Replace missing values in the three text columns with their
    /// placeholders. Returns the cleaned table together with the before/after
    /// missing-value report.
    ///
    /// The text columns are rendered to string dtype in the process, so a
    /// numeric value in a text column ends up as its ordinary textual form.
    ///
    /// # Errors
    ///
    /// [`PrepError::Schema`](crate::error::PrepError::Schema) if any of the
    /// three text columns is absent.
    pub fn clean(&self, df: DataFrame) -> Result<(DataFrame, CleanReport)> {
        schema::require_columns(&df, &schema::text_columns())?;

        let rows = df.height();
        let before = missing_percentages(&df);

        let fills: Vec<Expr> = schema::TEXT_FILLS
            .iter()
            .map(|(name, placeholder)| {
                col(*name)
                    .cast(DataType::String)
                    .fill_null(lit(*placeholder))
            })
            .collect();

        let cleaned = df.lazy().with_columns(fills).collect()?;

        let after = missing_percentages(&cleaned);
        let columns: Vec<ColumnMissing> = before
            .into_iter()
            .zip(after)
            .map(|((name, before_pct), (_, after_pct))| ColumnMissing {
                name,
                missing_before_pct: before_pct,
                missing_after_pct: after_pct,
            })
            .collect();

        for column in &columns {
            info!(
                "Missing values in '{}': {:.1}% -> {:.1}%",
                column.name, column.missing_before_pct, column.missing_after_pct
            );
        }

        Ok((cleaned, CleanReport { rows, columns }))
    }
}
