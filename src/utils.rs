//! Shared utilities for the preparation pipeline.
//!
//! Common helpers used across multiple components: random row sampling,
//! missing-value statistics and CSV snapshot writing.

use crate::error::{PrepError, Result};
use polars::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

/// Build the sampling RNG. A fixed seed makes every draw reproducible;
/// without one each run produces fresh randomness.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draw `n` rows uniformly at random without replacement.
///
/// `label` names the table (or group) being sampled and is only used in the
/// error when `n` exceeds the available rows.
pub fn sample_rows(df: &DataFrame, n: usize, label: &str, rng: &mut StdRng) -> Result<DataFrame> {
    if n > df.height() {
        return Err(PrepError::SampleSize {
            group: label.to_string(),
            requested: n,
            available: df.height(),
        });
    }

    let indices: Vec<IdxSize> = rand::seq::index::sample(rng, df.height(), n)
        .into_iter()
        .map(|i| i as IdxSize)
        .collect();
    let indices = IdxCa::from_vec("idx".into(), indices);

    Ok(df.take(&indices)?)
}

/// Percentage of missing values per column, over `df`'s full row count.
/// Returns `(name, pct)` pairs in table column order.
pub fn missing_percentages(df: &DataFrame) -> Vec<(String, f64)> {
    let height = df.height();
    df.get_columns()
        .iter()
        .map(|col| {
            let pct = if height == 0 {
                0.0
            } else {
                (col.null_count() as f64 / height as f64) * 100.0
            };
            (col.name().to_string(), pct)
        })
        .collect()
}

/// Write `df` to `path` as a CSV with a header row, overwriting any prior
/// content. Failures map to [`PrepError::Write`].
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path).map_err(|e| PrepError::Write {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| PrepError::Write {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df!(
            "a" => [1i64, 2, 3, 4, 5],
            "b" => [Some("x"), None, Some("z"), None, Some("w")],
        )
        .unwrap()
    }

    #[test]
    fn test_sample_rows_draws_without_replacement() {
        let df = frame();
        let mut rng = rng_from_seed(Some(1));
        let sample = sample_rows(&df, 3, "test", &mut rng).unwrap();
        assert_eq!(sample.height(), 3);
        assert_eq!(sample.width(), df.width());

        let drawn = sample.column("a").unwrap().as_materialized_series().clone();
        assert_eq!(drawn.n_unique().unwrap(), 3);
    }

    #[test]
    fn test_sample_rows_rejects_oversized_draw() {
        let df = frame();
        let mut rng = rng_from_seed(Some(1));
        let err = sample_rows(&df, 6, "test", &mut rng).unwrap_err();
        assert_eq!(err.error_code(), "SAMPLE_SIZE_ERROR");
    }

    #[test]
    fn test_sample_rows_seeded_is_deterministic() {
        let df = frame();
        let first = sample_rows(&df, 2, "test", &mut rng_from_seed(Some(9))).unwrap();
        let second = sample_rows(&df, 2, "test", &mut rng_from_seed(Some(9))).unwrap();
        assert!(first.equals_missing(&second));
    }

    #[test]
    fn test_missing_percentages() {
        let stats = missing_percentages(&frame());
        assert_eq!(stats[0], ("a".to_string(), 0.0));
        assert_eq!(stats[1].0, "b");
        assert!((stats[1].1 - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_percentages_empty_frame() {
        let df = frame().clear();
        for (_, pct) in missing_percentages(&df) {
            assert_eq!(pct, 0.0);
        }
    }
}
