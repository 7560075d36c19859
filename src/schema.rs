//! Declared schema for the product catalog dataset.
//!
//! The source data is a delimited file with a header row. Instead of looking
//! columns up by ad hoc string literals throughout the crate, the expected
//! columns are declared here once, with their role in the pipeline. A table
//! missing a required column surfaces as an explicit
//! [`PrepError::Schema`](crate::error::PrepError::Schema) naming the absent
//! column(s) rather than failing somewhere downstream.

use crate::error::{PrepError, Result};
use polars::prelude::*;

/// Unique row identifier; dropped to form the analysis table.
pub const PRODUCT_ID: &str = "PRODUCT_ID";
/// Numeric category code shared by many records; the stratification key.
pub const PRODUCT_TYPE_ID: &str = "PRODUCT_TYPE_ID";
/// Free-text product title.
pub const TITLE: &str = "TITLE";
/// Free-text bullet points.
pub const BULLET_POINTS: &str = "BULLET_POINTS";
/// Free-text long description.
pub const DESCRIPTION: &str = "DESCRIPTION";

/// Derived column: fixed-format concatenation of the three text fields.
pub const TEXT_SUMMARY: &str = "TEXT_SUMMARY";
/// Derived column: abstractive summary of [`TEXT_SUMMARY`].
pub const CLEAN_SUMMARY: &str = "clean_summary";

/// Placeholder substituted for a missing title.
pub const NO_TITLE: &str = "No Title";
/// Placeholder substituted for missing bullet points.
pub const NO_BULLET_POINTS: &str = "No Bullet Points";
/// Placeholder substituted for a missing description.
pub const NO_DESCRIPTION: &str = "No Description";

/// Role a declared column plays in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Unique identifier, removed before analysis.
    Identifier,
    /// Class/category key used for proportional sampling.
    GroupKey,
    /// Nullable free-text field cleaned and combined downstream.
    Text,
}

/// A single declared column of the catalog schema.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

/// Columns the pipeline requires in the source file. Extra columns pass
/// through every stage unchanged.
pub const CATALOG_SCHEMA: &[ColumnSpec] = &[
    ColumnSpec {
        name: PRODUCT_ID,
        kind: ColumnKind::Identifier,
    },
    ColumnSpec {
        name: PRODUCT_TYPE_ID,
        kind: ColumnKind::GroupKey,
    },
    ColumnSpec {
        name: TITLE,
        kind: ColumnKind::Text,
    },
    ColumnSpec {
        name: BULLET_POINTS,
        kind: ColumnKind::Text,
    },
    ColumnSpec {
        name: DESCRIPTION,
        kind: ColumnKind::Text,
    },
];

/// The text columns and the placeholder each one is filled with.
pub const TEXT_FILLS: &[(&str, &str)] = &[
    (TITLE, NO_TITLE),
    (BULLET_POINTS, NO_BULLET_POINTS),
    (DESCRIPTION, NO_DESCRIPTION),
];

/// Names of the three free-text columns, in combination order.
pub fn text_columns() -> [&'static str; 3] {
    [TITLE, BULLET_POINTS, DESCRIPTION]
}

/// Check that all `names` are present in `df`, otherwise return a
/// [`PrepError::Schema`] listing every missing column at once.
pub fn require_columns(df: &DataFrame, names: &[&str]) -> Result<()> {
    let present = df.get_column_names_str();
    let missing: Vec<String> = names
        .iter()
        .copied()
        .filter(|name| !present.contains(name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PrepError::Schema { missing })
    }
}

/// Validate a freshly loaded raw table against the declared schema.
pub fn validate(df: &DataFrame) -> Result<()> {
    let names: Vec<&str> = CATALOG_SCHEMA.iter().map(|spec| spec.name).collect();
    require_columns(df, &names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_frame() -> DataFrame {
        df!(
            PRODUCT_ID => [1i64, 2],
            PRODUCT_TYPE_ID => [100i64, 200],
            TITLE => ["a", "b"],
            BULLET_POINTS => ["c", "d"],
            DESCRIPTION => ["e", "f"],
        )
        .unwrap()
    }

    #[test]
    fn test_validate_accepts_declared_schema() {
        assert!(validate(&catalog_frame()).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_columns() {
        let df = catalog_frame().drop(DESCRIPTION).unwrap();
        let err = validate(&df).unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains(DESCRIPTION));
    }

    #[test]
    fn test_require_columns_lists_all_missing() {
        let df = df!(TITLE => ["a"]).unwrap();
        let err = require_columns(&df, &[TITLE, BULLET_POINTS, DESCRIPTION]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(BULLET_POINTS));
        assert!(msg.contains(DESCRIPTION));
        assert!(!msg.contains("TITLE,"));
    }

    #[test]
    fn test_extra_columns_are_not_required() {
        let mut df = catalog_frame();
        df.with_column(Series::new("PRODUCT_LENGTH".into(), [1.0f64, 2.0]))
            .unwrap();
        assert!(validate(&df).is_ok());
    }
}
