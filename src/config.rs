//! Configuration types for the catalog preparation pipeline.
//!
//! This module provides configuration options using the builder pattern.
//! All output locations the pipeline writes to are fixed here; every run
//! overwrites them wholesale.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the preparation pipeline.
///
/// Use [`PrepConfig::builder()`] to create a configuration with a fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_prep::PrepConfig;
///
/// let config = PrepConfig::builder()
///     .staging_dir("Data/Staging")
///     .preview_rows(20)
///     .seed(42)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepConfig {
    /// Directory holding the latest full snapshot of processed data.
    /// Created if absent; the snapshot is overwritten on each run.
    /// Default: "Data/Staging"
    pub staging_dir: PathBuf,

    /// File name of the staged snapshot inside `staging_dir`.
    /// Default: "train.csv"
    pub staging_file_name: String,

    /// Where the loader writes its random preview of the analysis table.
    /// Default: "data_batch.csv"
    pub load_sample_path: PathBuf,

    /// Where the publisher writes its random preview of the staged table.
    /// Lives outside the staging directory.
    /// Default: "data_staging_batch.csv"
    pub staging_sample_path: PathBuf,

    /// File name of the stratified sample, written next to the snapshot.
    /// Default: "sampled_train_data.csv"
    pub stratified_file_name: String,

    /// Number of rows drawn for the loader and publisher previews.
    /// Default: 20
    pub preview_rows: usize,

    /// Optional seed for all random sampling. When `None` (the default),
    /// sampling is non-deterministic and output files are not reproducible
    /// across runs; pass a seed if downstream consumers need reproducible
    /// artifacts.
    pub seed: Option<u64>,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            staging_dir: PathBuf::from("Data/Staging"),
            staging_file_name: "train.csv".to_string(),
            load_sample_path: PathBuf::from("data_batch.csv"),
            staging_sample_path: PathBuf::from("data_staging_batch.csv"),
            stratified_file_name: "sampled_train_data.csv".to_string(),
            preview_rows: 20,
            seed: None,
        }
    }
}

impl PrepConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PrepConfigBuilder {
        PrepConfigBuilder::default()
    }

    /// Full path of the staged snapshot.
    pub fn staging_file(&self) -> PathBuf {
        self.staging_dir.join(&self.staging_file_name)
    }

    /// Full path of the stratified sample output.
    pub fn stratified_file(&self) -> PathBuf {
        self.staging_dir.join(&self.stratified_file_name)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.preview_rows == 0 {
            return Err(ConfigValidationError::InvalidPreviewRows(self.preview_rows));
        }
        if self.staging_file_name.is_empty() {
            return Err(ConfigValidationError::EmptyFileName("staging_file_name"));
        }
        if self.stratified_file_name.is_empty() {
            return Err(ConfigValidationError::EmptyFileName("stratified_file_name"));
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid preview rows: {0} (must be at least 1)")]
    InvalidPreviewRows(usize),

    #[error("Configuration field '{0}' must not be empty")]
    EmptyFileName(&'static str),
}

/// Builder for [`PrepConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PrepConfigBuilder {
    staging_dir: Option<PathBuf>,
    staging_file_name: Option<String>,
    load_sample_path: Option<PathBuf>,
    staging_sample_path: Option<PathBuf>,
    stratified_file_name: Option<String>,
    preview_rows: Option<usize>,
    seed: Option<u64>,
}

impl PrepConfigBuilder {
    /// Set the staging directory for the processed snapshot.
    pub fn staging_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(path.into());
        self
    }

    /// Set the snapshot file name inside the staging directory.
    pub fn staging_file_name(mut self, name: impl Into<String>) -> Self {
        self.staging_file_name = Some(name.into());
        self
    }

    /// Set where the loader preview sample is written.
    pub fn load_sample_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.load_sample_path = Some(path.into());
        self
    }

    /// Set where the publisher preview sample is written.
    pub fn staging_sample_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.staging_sample_path = Some(path.into());
        self
    }

    /// Set the stratified sample file name inside the staging directory.
    pub fn stratified_file_name(mut self, name: impl Into<String>) -> Self {
        self.stratified_file_name = Some(name.into());
        self
    }

    /// Set the number of rows drawn for preview samples.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Fix the random seed, making all sampling reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PrepConfig` or an error if validation fails.
    pub fn build(self) -> Result<PrepConfig, ConfigValidationError> {
        let defaults = PrepConfig::default();
        let config = PrepConfig {
            staging_dir: self.staging_dir.unwrap_or(defaults.staging_dir),
            staging_file_name: self.staging_file_name.unwrap_or(defaults.staging_file_name),
            load_sample_path: self.load_sample_path.unwrap_or(defaults.load_sample_path),
            staging_sample_path: self
                .staging_sample_path
                .unwrap_or(defaults.staging_sample_path),
            stratified_file_name: self
                .stratified_file_name
                .unwrap_or(defaults.stratified_file_name),
            preview_rows: self.preview_rows.unwrap_or(defaults.preview_rows),
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PrepConfig::default();
        assert_eq!(config.preview_rows, 20);
        assert_eq!(config.staging_file_name, "train.csv");
        assert_eq!(config.staging_dir, PathBuf::from("Data/Staging"));
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = PrepConfig::builder()
            .staging_dir("/tmp/staging")
            .preview_rows(5)
            .seed(7)
            .build()
            .unwrap();

        assert_eq!(config.staging_dir, PathBuf::from("/tmp/staging"));
        assert_eq!(config.preview_rows, 5);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_staging_file_joins_dir_and_name() {
        let config = PrepConfig::builder()
            .staging_dir("out")
            .staging_file_name("snapshot.csv")
            .build()
            .unwrap();
        assert_eq!(config.staging_file(), PathBuf::from("out/snapshot.csv"));
    }

    #[test]
    fn test_validation_rejects_zero_preview_rows() {
        let result = PrepConfig::builder().preview_rows(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidPreviewRows(0)
        ));
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = PrepConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PrepConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.preview_rows, deserialized.preview_rows);
        assert_eq!(config.staging_dir, deserialized.staging_dir);
    }
}
