//! Proportional Sampler: class-proportional stratified sampling.
//!
//! For each distinct value of the group key, the target count is the floor
//! of that group's share of the table times the requested total. Groups
//! whose floor comes out to zero contribute no rows; the per-group floors
//! therefore rarely sum to exactly `total_size`. Output row order is the
//! concatenation of the per-group draws in a fresh sequential order. It is
//! unrelated to the input order and, without a seed, not stable across runs.

use crate::error::{PrepError, Result};
use crate::schema;
use crate::utils::sample_rows;
use polars::prelude::*;
use rand::rngs::StdRng;
use tracing::debug;

/// Draw a stratified sample of about `total_size` rows from `df`,
/// proportional to the frequency of each `group_key` value.
///
/// # Errors
///
/// - [`PrepError::Schema`](crate::error::PrepError::Schema) if `group_key`
///   is absent.
/// - [`PrepError::SampleSize`] if a group's target exceeds its row count,
///   which can happen when `total_size` exceeds the table's row count.
pub fn stratified_sample(
    df: &DataFrame,
    group_key: &str,
    total_size: usize,
    rng: &mut StdRng,
) -> Result<DataFrame> {
    schema::require_columns(df, &[group_key])?;

    let total = df.height();
    if total == 0 {
        return Ok(df.clear());
    }

    let mut out = df.clear();
    for group in df.partition_by([group_key], true)? {
        let group_len = group.height();
        // Exact floor of (group_len / total) * total_size.
        let target = group_len * total_size / total;

        let label = group
            .column(group_key)?
            .as_materialized_series()
            .get(0)?
            .to_string();

        if target == 0 {
            debug!("Group '{}' share rounds to zero rows; skipping", label);
            continue;
        }
        if target > group_len {
            return Err(PrepError::SampleSize {
                group: label,
                requested: target,
                available: group_len,
            });
        }

        debug!("Sampling {} of {} rows from group '{}'", target, group_len, label);
        let drawn = sample_rows(&group, target, &label, rng)?;
        out.vstack_mut(&drawn)?;
    }

    Ok(out)
}
