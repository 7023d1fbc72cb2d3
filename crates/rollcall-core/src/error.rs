//! Error types for the rollcall-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the rollcall library.
#[derive(Error, Debug)]
pub enum RollcallError {
    /// A source table could not be read.
    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// Writing records to a sink failed.
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    /// The configured input directory does not exist.
    #[error("input directory not found: {}", .0.display())]
    InputDirMissing(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning a source file into tables.
#[derive(Error, Debug)]
pub enum TableError {
    /// Failed to open the workbook.
    #[error("failed to open {}: {reason}", path.display())]
    Open { path: PathBuf, reason: String },

    /// Failed to read a worksheet.
    #[error("failed to read sheet '{sheet}': {reason}")]
    Sheet { sheet: String, reason: String },

    /// The workbook contains no worksheets.
    #[error("workbook has no sheets")]
    NoSheets,
}

/// Errors related to record sinks.
#[derive(Error, Debug)]
pub enum SinkError {
    /// Transport-level HTTP failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote store answered with a non-success status.
    #[error("remote store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The remote sink is missing required settings.
    #[error("remote sink not configured: {0}")]
    NotConfigured(String),

    /// Failed to serialize records.
    #[error("serialization failed: {0}")]
    Serialize(String),

    /// CSV writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while writing a file sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the rollcall library.
pub type Result<T> = std::result::Result<T, RollcallError>;
