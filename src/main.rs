//! CLI entry point for the catalog preparation pipeline.

use anyhow::{Result, anyhow};
use catalog_prep::{
    ExtractiveSummarizer, Pipeline, PrepConfig, PrepConfigBuilder, PrepReport, schema,
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Catalog data preparation pipeline",
    long_about = "Prepares raw product catalog exports for model training.\n\n\
                  EXAMPLES:\n  \
                  # Stage a raw export\n  \
                  catalog-prep prepare -i train.csv\n\n  \
                  # Reproducible staging with a fixed seed\n  \
                  catalog-prep prepare -i train.csv --seed 42\n\n  \
                  # Draw a 10k stratified sample from the staged snapshot\n  \
                  catalog-prep sample --total-size 10000\n\n  \
                  # Summarize the combined text of the staged snapshot\n  \
                  catalog-prep summarize -i Data/Staging/train.csv -o summarized.csv"
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load, clean, combine and publish a raw export to staging
    Prepare {
        /// Path to the raw catalog CSV file
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        common: CommonOpts,

        /// Number of rows in the preview sample files
        #[arg(long, default_value = "20")]
        preview_rows: usize,

        /// Output the run report as JSON to stdout instead of a summary
        ///
        /// Disables all progress logs; only the JSON report is written.
        /// Useful for piping to other tools: `... --json | jq .staged_shape`
        #[arg(long)]
        json: bool,
    },

    /// Draw a class-proportional stratified sample from the staged snapshot
    Sample {
        /// Column to stratify by
        #[arg(short, long, default_value = schema::PRODUCT_TYPE_ID)]
        group_key: String,

        /// Approximate number of rows to draw in total
        #[arg(short, long)]
        total_size: usize,

        #[command(flatten)]
        common: CommonOpts,
    },

    /// Summarize the combined text column of a staged file
    Summarize {
        /// Path to a staged CSV file with a TEXT_SUMMARY column
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the table with the added clean_summary column
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        common: CommonOpts,
    },
}

/// Options shared by every subcommand.
#[derive(ClapArgs, Debug)]
struct CommonOpts {
    /// Directory holding the staged snapshot
    #[arg(long, default_value = "Data/Staging")]
    staging_dir: PathBuf,

    /// Fixed seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,
}

impl CommonOpts {
    fn config_builder(&self) -> PrepConfigBuilder {
        let mut builder = PrepConfig::builder().staging_dir(&self.staging_dir);
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        builder
    }
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn build_pipeline(config: PrepConfig, quiet: bool, json: bool) -> Result<Pipeline> {
    let mut builder = Pipeline::builder().config(config);

    if !quiet && !json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    Ok(builder.build()?)
}

/// Print the human-readable run summary.
///
/// Intentionally uses `println!` rather than logging; this is the primary
/// output of the command and should not depend on the log level.
fn print_report(report: &PrepReport) {
    println!("\n{}", "=".repeat(60));
    println!("PREPARATION SUMMARY");
    println!("{}", "=".repeat(60));
    println!("  Input:    {}", report.input_file);
    println!("  Staged:   {}", report.staging_file);
    println!(
        "  Shape:    {} x {} -> {} x {}",
        report.raw_shape.0, report.raw_shape.1, report.staged_shape.0, report.staged_shape.1
    );
    println!("  Duration: {}ms", report.duration_ms);

    println!("\nMISSING VALUES (before -> after)");
    println!("{}", "-".repeat(40));
    for col in &report.clean_report.columns {
        println!(
            "  {:<16} {:>6.2}% -> {:>6.2}%",
            col.name, col.missing_before_pct, col.missing_after_pct
        );
    }

    if !report.warnings.is_empty() {
        println!("\nWARNINGS");
        println!("{}", "-".repeat(40));
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
    }
    println!("{}", "=".repeat(60));
}

fn main() -> Result<()> {
    let args = Args::parse();

    let json = matches!(&args.command, Command::Prepare { json: true, .. });
    init_logging(&args.log_level, args.quiet, json);

    match args.command {
        Command::Prepare {
            input,
            common,
            preview_rows,
            json,
        } => {
            let config = common
                .config_builder()
                .preview_rows(preview_rows)
                .build()?;
            let pipeline = build_pipeline(config, args.quiet, json)?;

            let report = pipeline
                .prepare(&input)
                .map_err(|e| anyhow!("[{}] {}", e.error_code(), e))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }

        Command::Sample {
            group_key,
            total_size,
            common,
        } => {
            let config = common.config_builder().build()?;
            let pipeline = build_pipeline(config, args.quiet, false)?;

            let sample = pipeline
                .sample_staging(&group_key, total_size)
                .map_err(|e| anyhow!("[{}] {}", e.error_code(), e))?;

            println!(
                "Sampled {} rows (stratified by {}) to {}",
                sample.height(),
                group_key,
                pipeline.config().stratified_file().display()
            );
        }

        Command::Summarize {
            input,
            output,
            common,
        } => {
            let config = common.config_builder().build()?;
            let pipeline = build_pipeline(config, args.quiet, false)?;

            let (df, failures) = pipeline
                .summarize_file(&input, &output, &ExtractiveSummarizer)
                .map_err(|e| anyhow!("[{}] {}", e.error_code(), e))?;

            println!(
                "Summarized {} rows to {} ({} failures recorded as empty)",
                df.height(),
                output.display(),
                failures
            );
        }
    }

    Ok(())
}
