//! Staging Publisher component: persists the processed snapshot.
//!
//! Publishing is a pure side-effecting step: it writes the full table to the
//! staging location (a wholesale overwrite, never a merge) plus a fresh
//! random preview outside the staging directory, then returns its input
//! unchanged. On any failure the caller must treat the staging state as
//! undefined and re-run from a clean state; nothing is rolled back.

use crate::config::PrepConfig;
use crate::error::{PrepError, Result};
use crate::utils::{rng_from_seed, sample_rows, write_csv};
use polars::prelude::*;
use tracing::{debug, info};

/// Writes the processed table to the staging area.
pub struct Publisher {
    config: PrepConfig,
}

impl Publisher {
    pub fn new(config: PrepConfig) -> Self {
        Self { config }
    }

    /// Persist `df` to the staging snapshot and write a fresh preview
    /// sample, returning the table unchanged.
    ///
    /// The staging directory is created if absent (idempotent). The preview
    /// draw is independent of the loader's.
    ///
    /// # Errors
    ///
    /// [`PrepError::Write`] on any I/O failure, or
    /// [`PrepError::SampleSize`](crate::error::PrepError::SampleSize) if the
    /// table has fewer rows than the configured preview size.
    pub fn publish(&self, mut df: DataFrame) -> Result<DataFrame> {
        std::fs::create_dir_all(&self.config.staging_dir).map_err(|e| PrepError::Write {
            path: self.config.staging_dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let staging_file = self.config.staging_file();
        write_csv(&mut df, &staging_file)?;
        info!(
            "Staged {} rows x {} columns to {}",
            df.height(),
            df.width(),
            staging_file.display()
        );

        let mut rng = rng_from_seed(self.config.seed);
        let mut sample = sample_rows(&df, self.config.preview_rows, "staging preview", &mut rng)?;
        write_csv(&mut sample, &self.config.staging_sample_path)?;
        debug!(
            "Wrote {}-row staging preview to {}",
            sample.height(),
            self.config.staging_sample_path.display()
        );

        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "catalog_prep_publisher_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config(dir: &Path) -> PrepConfig {
        PrepConfig::builder()
            .staging_dir(dir.join("staging"))
            .load_sample_path(dir.join("data_batch.csv"))
            .staging_sample_path(dir.join("data_staging_batch.csv"))
            .preview_rows(2)
            .seed(1)
            .build()
            .unwrap()
    }

    fn frame() -> DataFrame {
        df!(
            "PRODUCT_TYPE_ID" => [100i64, 100, 200, 200],
            "TEXT_SUMMARY" => ["a. b. c", "d. e. f", "g. h. i", "j. k. l"],
        )
        .unwrap()
    }

    #[test]
    fn test_publish_writes_snapshot_and_preview() {
        let dir = test_dir("writes");
        let cfg = config(&dir);
        let out = Publisher::new(cfg.clone()).publish(frame()).unwrap();

        assert!(cfg.staging_file().exists());
        assert!(cfg.staging_sample_path.exists());
        assert!(out.equals(&frame()));
    }

    #[test]
    fn test_publish_creates_staging_dir() {
        let dir = test_dir("creates_dir");
        let cfg = config(&dir);
        assert!(!cfg.staging_dir.exists());
        Publisher::new(cfg.clone()).publish(frame()).unwrap();
        assert!(cfg.staging_dir.is_dir());
    }

    #[test]
    fn test_publish_overwrites_wholesale() {
        let dir = test_dir("overwrite");
        let cfg = config(&dir);
        let publisher = Publisher::new(cfg.clone());

        publisher.publish(frame()).unwrap();
        let smaller = frame().head(Some(3));
        publisher.publish(smaller).unwrap();

        let content = fs::read_to_string(cfg.staging_file()).unwrap();
        // Header plus exactly three data rows; no leftovers from the first write.
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn test_publish_fails_when_preview_exceeds_rows() {
        let dir = test_dir("too_small");
        let cfg = PrepConfig::builder()
            .staging_dir(dir.join("staging"))
            .staging_sample_path(dir.join("data_staging_batch.csv"))
            .preview_rows(10)
            .build()
            .unwrap();

        let err = Publisher::new(cfg).publish(frame()).unwrap_err();
        assert_eq!(err.error_code(), "SAMPLE_SIZE_ERROR");
    }
}
