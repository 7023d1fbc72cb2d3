//! JSON and CSV record files.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::SinkError;
use crate::models::config::OutputFormat;
use crate::models::record::Record;

/// Column order of CSV output.
pub const CSV_HEADER: [&str; 8] = [
    "id",
    "firstName",
    "lastName",
    "fullName",
    "contact",
    "address",
    "pincode",
    "city",
];

/// Write `records` to `path`, creating parent directories as needed.
///
/// JSON output is an array of camelCase objects; `pretty` only affects JSON.
pub fn write_records(
    path: &Path,
    records: &[Record],
    format: OutputFormat,
    pretty: bool,
) -> Result<(), SinkError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Json => write_json(&mut writer, records, pretty)?,
        OutputFormat::Csv => write_csv(&mut writer, records)?,
    }
    writer.flush()?;

    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Load records previously written as JSON.
pub fn read_records(path: &Path) -> Result<Vec<Record>, SinkError> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| SinkError::Serialize(e.to_string()))
}

fn write_json<W: Write>(writer: W, records: &[Record], pretty: bool) -> Result<(), SinkError> {
    let result = if pretty {
        serde_json::to_writer_pretty(writer, records)
    } else {
        serde_json::to_writer(writer, records)
    };
    result.map_err(|e| SinkError::Serialize(e.to_string()))
}

fn write_csv<W: Write>(writer: W, records: &[Record]) -> Result<(), SinkError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for record in records {
        let p = &record.person;
        wtr.write_record([
            &record.id,
            &p.first_name,
            &p.last_name,
            &p.full_name,
            &p.contact,
            &p.address,
            &p.pincode,
            &p.city,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
