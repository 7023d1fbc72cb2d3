//! Data models: records, candidates and configuration.

pub mod config;
pub mod record;

pub use config::{ExtractionConfig, InputConfig, OutputConfig, OutputFormat, RemoteConfig, RollcallConfig};
pub use record::{Candidate, Person, Record, SourceKind};
