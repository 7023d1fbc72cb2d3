//! Extract command - run the extraction pipeline over an input directory.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use rollcall_core::models::config::OutputFormat as SinkFormat;
use rollcall_core::{list_source_files, write_records, ExtractionReport, Gazetteer, Pipeline, RecordExtractor};

use super::{load_config, push_records};

/// Output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// JSON array of records
    Json,
    /// CSV with a header row
    Csv,
}

impl From<OutputFormat> for SinkFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => SinkFormat::Json,
            OutputFormat::Csv => SinkFormat::Csv,
        }
    }
}

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Directory containing the spreadsheets
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Locality list, one entry per line, replacing the configured gazetteer
    #[arg(short, long)]
    gazetteer: Option<PathBuf>,

    /// Read every worksheet instead of only the first
    #[arg(long)]
    all_sheets: bool,

    /// Extract files one at a time
    #[arg(long)]
    no_parallel: bool,

    /// Upload the records to the remote store afterwards
    #[arg(long)]
    upload: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;

    // Command line overrides
    if let Some(input) = args.input {
        config.input.dir = input;
    }
    if let Some(output) = args.output {
        config.output.path = output;
    }
    if let Some(format) = args.format {
        config.output.format = format.into();
    }
    config.output.pretty |= args.pretty;
    config.input.all_sheets |= args.all_sheets;
    if args.no_parallel {
        config.extraction.parallel = false;
    }

    let mut pipeline = Pipeline::from_config(&config);
    if let Some(path) = &args.gazetteer {
        let gazetteer = Gazetteer::from_file(path).map_err(|e| {
            anyhow::anyhow!("Failed to read gazetteer {}: {}", path.display(), e)
        })?;
        if gazetteer.is_empty() {
            anyhow::bail!("Gazetteer {} has no entries", path.display());
        }
        debug!("Loaded {} gazetteer entries from {}", gazetteer.len(), path.display());
        pipeline = pipeline.with_extractor(
            RecordExtractor::from_config(&config.extraction).with_gazetteer(gazetteer),
        );
    }

    let files = list_source_files(&config.input.dir, &config.input.extensions)?;

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(files.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let report = pipeline.run_with_progress(&files, |_| pb.inc(1));
    pb.finish_and_clear();

    write_records(
        &config.output.path,
        &report.records,
        config.output.format,
        config.output.pretty,
    )?;

    print_summary(&report, start.elapsed().as_millis());
    println!(
        "{} Wrote {} records to {}",
        style("✓").green(),
        report.records.len(),
        config.output.path.display()
    );

    if args.upload {
        let upload = push_records(&config, &report.records).await?;
        if !upload.is_complete() {
            anyhow::bail!("{} batches failed to upload", upload.failed_batches.len());
        }
    }

    Ok(())
}

fn print_summary(report: &ExtractionReport, elapsed_ms: u128) {
    println!();
    println!(
        "{} Processed {} files in {}ms",
        style("✓").green(),
        report.files_processed,
        elapsed_ms
    );
    println!(
        "   {} tables, {} failed files",
        report.tables,
        style(report.failures.len()).red()
    );
    for (layout, count) in &report.layouts {
        println!("   {:<14} {}", layout.to_string(), count);
    }
    println!("   Total records found: {}", report.candidates);
    println!(
        "   Total unique voters: {}",
        style(report.records.len()).green()
    );

    if !report.failures.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for failure in &report.failures {
            println!("  - {}: {}", failure.path.display(), failure.error);
        }
    }
}
