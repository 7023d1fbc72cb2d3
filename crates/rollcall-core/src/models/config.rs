//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::extract::rules::DEFAULT_GAZETTEER;

/// Main configuration for the rollcall pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RollcallConfig {
    /// Source file discovery and reading.
    pub input: InputConfig,

    /// Record extraction configuration.
    pub extraction: ExtractionConfig,

    /// File sink configuration.
    pub output: OutputConfig,

    /// Remote store configuration.
    pub remote: RemoteConfig,
}

/// Source file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory scanned for source files.
    pub dir: PathBuf,

    /// File extensions (without dot, case-insensitive) to pick up.
    pub extensions: Vec<String>,

    /// Treat the first used row of each sheet as a header, not data.
    pub header_row: bool,

    /// Read every worksheet instead of only the first.
    pub all_sheets: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("input"),
            extensions: vec!["xlsx".to_string()],
            header_row: true,
            all_sheets: false,
        }
    }
}

/// Record extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Ordered locality names used for city detection. First match wins.
    pub gazetteer: Vec<String>,

    /// Cell text that stands for a missing value.
    pub missing_sentinel: String,

    /// Cells examined after a vertical-span record start.
    pub lookahead_window: usize,

    /// Shortest name accepted by the two-column reconstructor.
    pub min_name_len: usize,

    /// Extract tables on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            gazetteer: DEFAULT_GAZETTEER.iter().map(|s| s.to_string()).collect(),
            missing_sentinel: "nan".to_string(),
            lookahead_window: 4,
            min_name_len: 3,
            parallel: true,
        }
    }
}

/// Format written by the file sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON array of records.
    #[default]
    Json,
    /// CSV with a header row.
    Csv,
}

/// File sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination file.
    pub path: PathBuf,

    /// Output format.
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("voters.json"),
            format: OutputFormat::Json,
            pretty: false,
        }
    }
}

/// Remote store configuration (PostgREST-compatible endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the project, e.g. `https://example.supabase.co`.
    pub url: Option<String>,

    /// Table receiving the records.
    pub table: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Records per upsert request.
    pub batch_size: usize,

    /// Delete all stored rows before uploading.
    pub clear_before_upload: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: None,
            table: "voters".to_string(),
            api_key_env: "ROLLCALL_API_KEY".to_string(),
            batch_size: 500,
            clear_before_upload: true,
        }
    }
}

impl RollcallConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
