//! Upload command - push an existing records file to the remote store.

use std::path::PathBuf;

use clap::Args;
use console::style;

use rollcall_core::dedup::rededuplicate;
use rollcall_core::sink::read_records;

use super::{load_config, push_records};

/// Arguments for the upload command.
#[derive(Args)]
pub struct UploadArgs {
    /// JSON records file written by `rollcall extract`
    input: PathBuf,

    /// Keep the stored rows instead of clearing them first
    #[arg(long)]
    keep_existing: bool,

    /// Records per request
    #[arg(short, long)]
    batch_size: Option<usize>,
}

pub async fn run(args: UploadArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if args.keep_existing {
        config.remote.clear_before_upload = false;
    }
    if let Some(batch_size) = args.batch_size {
        config.remote.batch_size = batch_size;
    }

    let loaded = read_records(&args.input)?;
    let count = loaded.len();
    let records = rededuplicate(loaded);
    if records.len() != count {
        println!(
            "{} Dropped {} duplicate records",
            style("⚠").yellow(),
            count - records.len()
        );
    }

    let report = push_records(&config, &records).await?;
    if !report.is_complete() {
        anyhow::bail!("{} batches failed to upload", report.failed_batches.len());
    }

    Ok(())
}
