//! Subcommands.

pub mod config;
pub mod extract;
pub mod upload;

use std::path::Path;

use console::style;
use rollcall_core::models::config::RollcallConfig;
use rollcall_core::sink::{RemoteSink, UploadReport};
use rollcall_core::Record;

/// Load the config from `path`, else from the default location if present,
/// else defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<RollcallConfig> {
    if let Some(path) = path {
        return Ok(RollcallConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(RollcallConfig::from_file(&default_path)?)
    } else {
        Ok(RollcallConfig::default())
    }
}

/// Clear (if configured), upload and verify against the remote store.
pub async fn push_records(config: &RollcallConfig, records: &[Record]) -> anyhow::Result<UploadReport> {
    let sink = RemoteSink::from_config(&config.remote)?;

    if config.remote.clear_before_upload {
        println!("{} Clearing existing records...", style("ℹ").blue());
        sink.clear().await?;
    }

    println!(
        "{} Uploading {} records to {}",
        style("ℹ").blue(),
        records.len(),
        sink.endpoint()
    );
    let report = sink.upload(records).await;

    println!(
        "{} Uploaded {} records in {} batches",
        style("✓").green(),
        report.uploaded,
        report.batches
    );
    for (index, error) in &report.failed_batches {
        println!("  {} batch {}: {}", style("✗").red(), index, error);
    }

    match sink.count().await {
        Ok(Some(total)) => println!("   Total in remote store: {}", style(total).bold()),
        Ok(None) => println!("   Total in remote store: unknown"),
        Err(e) => println!("{} Could not read remote count: {}", style("⚠").yellow(), e),
    }

    Ok(report)
}
