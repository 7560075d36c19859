//! Loader component: reads the raw catalog file into memory.
//!
//! The loader parses the delimited source file, validates it against the
//! declared schema, derives the de-identified analysis table and writes a
//! small random preview of it to disk. The preview write is a side effect:
//! its failure never loses the already-loaded tables, but it is surfaced in
//! the [`LoadOutcome`] so the caller can report it.

use crate::config::PrepConfig;
use crate::error::{PrepError, Result};
use crate::schema;
use crate::utils::{rng_from_seed, sample_rows, write_csv};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, error, info};

/// Result of loading the source file.
#[derive(Debug)]
pub struct LoadOutcome {
    /// The table exactly as parsed, identifier included.
    pub raw: DataFrame,
    /// The raw table with the identifier column removed.
    pub analysis: DataFrame,
    /// Error from the non-fatal preview sample write, if it failed.
    pub sample_write_error: Option<PrepError>,
}

/// Loads the catalog source file and derives the analysis table.
pub struct Loader {
    config: PrepConfig,
}

impl Loader {
    pub fn new(config: PrepConfig) -> Self {
        Self { config }
    }

    /// Load `path` into a raw table and a de-identified analysis table.
    ///
    /// # Errors
    ///
    /// - [`PrepError::NotFound`] if the path does not exist (checked before
    ///   any read is attempted).
    /// - [`PrepError::Parse`] if the file cannot be parsed as delimited text.
    /// - [`PrepError::Schema`] if a declared column is absent.
    pub fn load(&self, path: &Path) -> Result<LoadOutcome> {
        if !path.exists() {
            error!("File {} does not exist", path.display());
            return Err(PrepError::NotFound(path.display().to_string()));
        }

        let raw = read_table(path)?;
        schema::validate(&raw)?;

        let analysis = raw.drop(schema::PRODUCT_ID)?;

        info!("Data loaded successfully from {}", path.display());
        info!("Data shape: {:?}", raw.shape());
        debug!("Data preview:\n{}", raw.head(Some(5)));

        let sample_write_error = match self.write_batch_sample(&analysis) {
            Ok(()) => None,
            Err(e) => {
                error!("Failed to write load preview sample: {}", e);
                Some(e)
            }
        };

        Ok(LoadOutcome {
            raw,
            analysis,
            sample_write_error,
        })
    }

    /// Draw a uniform random preview of the analysis table and write it to
    /// the configured batch file.
    fn write_batch_sample(&self, analysis: &DataFrame) -> Result<()> {
        let mut rng = rng_from_seed(self.config.seed);
        let mut sample = sample_rows(analysis, self.config.preview_rows, "load preview", &mut rng)?;
        write_csv(&mut sample, &self.config.load_sample_path)?;
        debug!(
            "Wrote {}-row preview to {}",
            sample.height(),
            self.config.load_sample_path.display()
        );
        Ok(())
    }
}

/// Parse a delimited file with a header row into a table.
fn read_table(path: &Path) -> Result<DataFrame> {
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
