//! Pipeline orchestration for catalog preparation.
//!
//! [`Pipeline`] wires the loader, cleaner, combiner and publisher into the
//! fixed load → clean → combine → publish chain, and exposes the two
//! follow-on flows (stratified sampling and summarization) that read the
//! staged snapshot. Construction goes through [`PipelineBuilder`].

use crate::cleaner::Cleaner;
use crate::combiner::Combiner;
use crate::config::{ConfigValidationError, PrepConfig};
use crate::error::{PrepError, Result};
use crate::loader::Loader;
use crate::publisher::Publisher;
use crate::sampler::stratified_sample;
use crate::summarizer::{summarize_column, Summarizer};
use crate::types::PrepReport;
use crate::utils::{rng_from_seed, write_csv};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use super::progress::{ClosureProgressReporter, PrepStage, ProgressReporter, ProgressUpdate};

/// Orchestrates the catalog preparation flows.
///
/// A pipeline is immutable after construction and can be shared across
/// threads; each run draws its own random state from the configured seed.
pub struct Pipeline {
    config: PrepConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    loader: Loader,
    cleaner: Cleaner,
    combiner: Combiner,
    publisher: Publisher,
}

static_assertions::assert_impl_all!(Pipeline: Send, Sync);

impl Pipeline {
    /// Create a pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &PrepConfig {
        &self.config
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    /// Run the full load → clean → combine → publish chain over `input`.
    ///
    /// Returns a [`PrepReport`] describing the run. A failed preview-sample
    /// write during loading is surfaced as a warning in the report, not as an
    /// error; every other failure aborts the run.
    pub fn prepare(&self, input: &Path) -> Result<PrepReport> {
        let result = self.prepare_internal(input);

        match &result {
            Ok(report) => {
                self.report_progress(ProgressUpdate::complete(format!(
                    "Staged {} rows to {}",
                    report.staged_shape.0, report.staging_file
                )));
            }
            Err(e) => {
                error!("Preparation failed: {}", e);
                self.report_progress(ProgressUpdate::failed(format!("Preparation failed: {}", e)));
            }
        }

        result
    }

    fn prepare_internal(&self, input: &Path) -> Result<PrepReport> {
        let start = Instant::now();
        let mut steps = Vec::new();
        let mut warnings = Vec::new();

        self.report_progress(ProgressUpdate::new(
            PrepStage::Loading,
            0.0,
            format!("Loading {}", input.display()),
        ));

        let outcome = self.loader.load(input)?;
        let raw_shape = outcome.raw.shape();
        steps.push(format!(
            "loaded {} rows x {} columns from {}",
            raw_shape.0,
            raw_shape.1,
            input.display()
        ));
        if let Some(e) = &outcome.sample_write_error {
            warnings.push(format!("load preview sample not written: {}", e));
        }

        self.report_progress(ProgressUpdate::new(
            PrepStage::Cleaning,
            0.0,
            "Filling missing text fields",
        ));
        let (cleaned, clean_report) = self.cleaner.clean(outcome.analysis)?;
        steps.push(format!(
            "cleaned {} text columns over {} rows",
            clean_report.columns.len(),
            clean_report.rows
        ));

        self.report_progress(ProgressUpdate::new(
            PrepStage::Combining,
            0.0,
            "Deriving combined text column",
        ));
        let combined = self.combiner.combine(cleaned)?;
        steps.push("derived combined text column".to_string());

        self.report_progress(ProgressUpdate::new(
            PrepStage::Publishing,
            0.0,
            "Writing staged snapshot",
        ));
        let staged = self.publisher.publish(combined)?;
        let staging_file = self.config.staging_file();
        steps.push(format!("staged snapshot to {}", staging_file.display()));

        let report = PrepReport {
            input_file: input.display().to_string(),
            raw_shape,
            staged_shape: staged.shape(),
            staging_file: staging_file.display().to_string(),
            duration_ms: start.elapsed().as_millis() as u64,
            clean_report,
            steps,
            warnings,
        };

        info!(
            "Preparation complete in {}ms: {:?} -> {:?}",
            report.duration_ms, report.raw_shape, report.staged_shape
        );
        Ok(report)
    }

    /// Draw a class-proportional stratified sample from the staged snapshot
    /// and write it next to the snapshot.
    ///
    /// Reads the snapshot back from disk, so it samples whatever the last
    /// publish actually wrote.
    ///
    /// # Errors
    ///
    /// [`PrepError::NotFound`] if no snapshot has been staged yet, plus the
    /// sampler's own errors.
    pub fn sample_staging(&self, group_key: &str, total_size: usize) -> Result<DataFrame> {
        let result = self.sample_staging_internal(group_key, total_size);

        match &result {
            Ok(sample) => {
                self.report_progress(ProgressUpdate::complete(format!(
                    "Sampled {} rows to {}",
                    sample.height(),
                    self.config.stratified_file().display()
                )));
            }
            Err(e) => {
                error!("Stratified sampling failed: {}", e);
                self.report_progress(ProgressUpdate::failed(format!("Sampling failed: {}", e)));
            }
        }

        result
    }

    fn sample_staging_internal(&self, group_key: &str, total_size: usize) -> Result<DataFrame> {
        let staging_file = self.config.staging_file();
        self.report_progress(ProgressUpdate::new(
            PrepStage::Sampling,
            0.0,
            format!("Sampling {} rows from staging", total_size),
        ));

        let staged = read_staged(&staging_file)?;
        info!(
            "Sampling {} rows from {} staged rows, stratified by '{}'",
            total_size,
            staged.height(),
            group_key
        );

        let mut rng = rng_from_seed(self.config.seed);
        let mut sample = stratified_sample(&staged, group_key, total_size, &mut rng)?;

        let out_path = self.config.stratified_file();
        write_csv(&mut sample, &out_path)?;
        info!("Wrote {} sampled rows to {}", sample.height(), out_path.display());

        Ok(sample)
    }

    /// Summarize the combined text column of `input` with the given backend
    /// and write the augmented table to `output`.
    ///
    /// Returns the augmented table and the number of rows whose summary
    /// failed (recorded as empty strings in the output).
    pub fn summarize_file(
        &self,
        input: &Path,
        output: &Path,
        summarizer: &dyn Summarizer,
    ) -> Result<(DataFrame, usize)> {
        let result = self.summarize_file_internal(input, output, summarizer);

        match &result {
            Ok((df, failures)) => {
                self.report_progress(ProgressUpdate::complete(format!(
                    "Summarized {} rows ({} failures) to {}",
                    df.height(),
                    failures,
                    output.display()
                )));
            }
            Err(e) => {
                error!("Summarization failed: {}", e);
                self.report_progress(ProgressUpdate::failed(format!(
                    "Summarization failed: {}",
                    e
                )));
            }
        }

        result
    }

    fn summarize_file_internal(
        &self,
        input: &Path,
        output: &Path,
        summarizer: &dyn Summarizer,
    ) -> Result<(DataFrame, usize)> {
        self.report_progress(ProgressUpdate::new(
            PrepStage::Summarizing,
            0.0,
            format!("Summarizing {}", input.display()),
        ));

        let df = read_staged(input)?;

        let (mut summarized, failures) = summarize_column(df, summarizer)?;
        write_csv(&mut summarized, output)?;

        Ok((summarized, failures))
    }
}

/// Read a previously written snapshot or staged file back from disk.
fn read_staged(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(PrepError::NotFound(path.display().to_string()));
    }

    let parse_err = |source| PrepError::Parse {
        path: path.display().to_string(),
        source,
    };

    CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_err)?
        .finish()
        .map_err(parse_err)
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PrepConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl PipelineBuilder {
    /// Use the given configuration instead of the defaults.
    pub fn config(mut self, config: PrepConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Receive progress updates through a closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Receive progress updates through a reporter instance.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> std::result::Result<Pipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline {
            loader: Loader::new(config.clone()),
            cleaner: Cleaner,
            combiner: Combiner,
            publisher: Publisher::new(config.clone()),
            progress_reporter: self.progress_reporter,
            config,
        })
    }
}
