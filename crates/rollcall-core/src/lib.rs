//! Core library for rollcall: person records from ragged spreadsheets.
//!
//! This crate provides:
//! - Table sources (xlsx/xls/ods via calamine)
//! - Layout classification by column count
//! - Structured-column, merged-cell, vertical-span and two-column parsers
//! - Global deduplication with dense id assignment
//! - File and remote REST sinks

pub mod dedup;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod sink;
pub mod table;

pub use dedup::deduplicate;
pub use error::{RollcallError, Result, SinkError, TableError};
pub use extract::rules::Gazetteer;
pub use extract::{classify, Layout, RecordExtractor, TableExtraction};
pub use models::config::RollcallConfig;
pub use models::record::{Candidate, Person, Record, SourceKind};
pub use pipeline::{ExtractionReport, FileFailure, Pipeline};
pub use sink::{write_records, RemoteSink, UploadReport};
pub use table::{list_source_files, Table, TableSource, XlsxSource};
