//! End-to-end extraction over a set of source files.
//!
//! Files are read and extracted independently (optionally on the rayon pool),
//! then folded in input order and deduplicated once.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::dedup::deduplicate;
use crate::error::TableError;
use crate::extract::{Layout, RecordExtractor, TableExtraction};
use crate::models::config::RollcallConfig;
use crate::models::record::{Candidate, Record};
use crate::table::{list_source_files, TableSource, XlsxSource};

/// A file that could not be read.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionReport {
    /// Source files handed to the run.
    pub files_found: usize,
    /// Files read successfully.
    pub files_processed: usize,
    /// Files skipped because they could not be read.
    pub failures: Vec<FileFailure>,
    /// Tables extracted.
    pub tables: usize,
    /// Tables per detected layout.
    pub layouts: BTreeMap<Layout, usize>,
    /// Candidates before deduplication.
    pub candidates: usize,
    /// Final records.
    #[serde(skip)]
    pub records: Vec<Record>,
    /// Wall time in milliseconds.
    pub processing_time_ms: u64,
}

/// Reads files through a [`TableSource`] and extracts records from them.
pub struct Pipeline<S> {
    source: S,
    extractor: RecordExtractor,
    parallel: bool,
}

impl Pipeline<XlsxSource> {
    /// Spreadsheet pipeline configured from `config`.
    pub fn from_config(config: &RollcallConfig) -> Self {
        Self::new(
            XlsxSource::from_config(&config.input),
            RecordExtractor::from_config(&config.extraction),
        )
        .with_parallel(config.extraction.parallel)
    }
}

impl<S: TableSource> Pipeline<S> {
    /// Create a pipeline running files in parallel.
    pub fn new(source: S, extractor: RecordExtractor) -> Self {
        Self {
            source,
            extractor,
            parallel: true,
        }
    }

    /// Replace the record extractor.
    pub fn with_extractor(mut self, extractor: RecordExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Set whether files are extracted on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Read one file and extract every table in it.
    pub fn extract_file(&self, path: &Path) -> Result<Vec<TableExtraction>, TableError> {
        let tables = self.source.read_tables(path)?;
        Ok(tables
            .iter()
            .map(|table| self.extractor.extract_table(table))
            .collect())
    }

    /// List `dir` and run over the matching files.
    ///
    /// Fails only when the directory is missing.
    pub fn run_dir(&self, dir: &Path, extensions: &[String]) -> crate::Result<ExtractionReport> {
        let files = list_source_files(dir, extensions)?;
        Ok(self.run(&files))
    }

    /// Run over `files`. Unreadable files are logged and skipped.
    pub fn run(&self, files: &[PathBuf]) -> ExtractionReport {
        self.run_with_progress(files, |_| {})
    }

    /// Like [`Pipeline::run`], calling `on_file` after each file is extracted.
    pub fn run_with_progress<F>(&self, files: &[PathBuf], on_file: F) -> ExtractionReport
    where
        F: Fn(&Path) + Sync,
    {
        let start = Instant::now();

        let extract = |path: &PathBuf| {
            let outcome = self.extract_file(path);
            on_file(path);
            outcome
        };

        // collect keeps input order in both modes
        let outcomes: Vec<_> = if self.parallel {
            files.par_iter().map(extract).collect()
        } else {
            files.iter().map(extract).collect()
        };

        let mut report = ExtractionReport {
            files_found: files.len(),
            ..Default::default()
        };
        let mut candidates: Vec<Candidate> = Vec::new();

        for (path, outcome) in files.iter().zip(outcomes) {
            match outcome {
                Ok(extractions) => {
                    report.files_processed += 1;
                    for extraction in extractions {
                        info!(
                            "{}: {} layout, {} records found",
                            extraction.table,
                            extraction.layout,
                            extraction.candidates.len()
                        );
                        report.tables += 1;
                        *report.layouts.entry(extraction.layout).or_default() += 1;
                        candidates.extend(extraction.candidates);
                    }
                }
                Err(e) => {
                    warn!("Error processing {}: {}", path.display(), e);
                    report.failures.push(FileFailure {
                        path: path.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        report.candidates = candidates.len();
        report.records = deduplicate(candidates);
        report.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Total records found: {}, unique: {}",
            report.candidates,
            report.records.len()
        );
        debug!("Pipeline finished in {}ms", report.processing_time_ms);

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// Serves canned tables by file name; unknown names fail to open.
    struct MemorySource {
        files: HashMap<String, Vec<Table>>,
    }

    impl MemorySource {
        fn new(files: Vec<(&str, Vec<Table>)>) -> Self {
            Self {
                files: files.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            }
        }
    }

    impl TableSource for MemorySource {
        fn read_tables(&self, path: &Path) -> Result<Vec<Table>, TableError> {
            let name = path.to_string_lossy().into_owned();
            self.files.get(&name).cloned().ok_or(TableError::Open {
                path: path.to_path_buf(),
                reason: "corrupt".to_string(),
            })
        }
    }

    fn ten_column(rows: Vec<(&str, &str, &str, &str)>) -> Table {
        let rows = rows
            .into_iter()
            .map(|(serial, name, info, phone)| {
                let mut row = vec![String::new(); 10];
                row[6] = serial.into();
                row[7] = name.into();
                row[8] = info.into();
                row[9] = phone.into();
                row
            })
            .collect();
        Table::new("ten", rows)
    }

    fn merged_sheet(cells: Vec<&str>) -> Table {
        let rows = cells
            .into_iter()
            .map(|c| {
                let mut row = vec![String::new(); 5];
                row[0] = c.into();
                row
            })
            .collect();
        Table::new("merged", rows)
    }

    #[test]
    fn test_cross_strategy_duplicates_collapse() {
        let source = MemorySource::new(vec![
            (
                "a.xlsx",
                vec![merged_sheet(vec![
                    "60003\nSUKANTA SARKAR D/ Late Ram\nContact: 9123456780\nAddress: Block C, Rohini, Delhi 110085",
                ])],
            ),
            (
                "b.xlsx",
                vec![ten_column(vec![
                    ("9", "SUKANTA SARKAR", "Address: somewhere else", "9123456780"),
                    ("77", "RAM KUMAR", "Address: H.No 12, Sector 5, Noida 201301", "9876543210"),
                ])],
            ),
        ]);

        let pipeline = Pipeline::new(source, RecordExtractor::new());
        let report = pipeline.run(&[PathBuf::from("a.xlsx"), PathBuf::from("b.xlsx")]);

        assert_eq!(report.candidates, 3);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].id, "000001");
        assert_eq!(report.records[0].person.address, "Block C, Rohini, Delhi 110085");
        assert_eq!(report.records[1].id, "000002");
        assert_eq!(report.records[1].person.full_name, "RAM KUMAR");
        assert_eq!(report.layouts.get(&Layout::MergedOnly), Some(&1));
        assert_eq!(report.layouts.get(&Layout::TenColumn), Some(&1));
    }

    #[test]
    fn test_bad_file_is_skipped() {
        let source = MemorySource::new(vec![(
            "good.xlsx",
            vec![ten_column(vec![("1", "ASHA", "", "9000000001")])],
        )]);

        let pipeline = Pipeline::new(source, RecordExtractor::new()).with_parallel(false);
        let files = vec![PathBuf::from("bad.xlsx"), PathBuf::from("good.xlsx")];
        let report = pipeline.run(&files);

        assert_eq!(report.files_found, 2);
        assert_eq!(report.files_processed, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, PathBuf::from("bad.xlsx"));
        assert_eq!(report.records.len(), 1);
    }

    #[test]
    fn test_parallel_matches_sequential_order() {
        let files: Vec<(String, Vec<Table>)> = (0..12)
            .map(|i| {
                let name = format!("PERSON {}", i);
                let phone = format!("90000000{:02}", i);
                (
                    format!("f{:02}.xlsx", i),
                    vec![ten_column(vec![("1", name.as_str(), "", phone.as_str())])],
                )
            })
            .collect();
        let paths: Vec<PathBuf> = files.iter().map(|(n, _)| PathBuf::from(n)).collect();
        let source = |files: &Vec<(String, Vec<Table>)>| MemorySource {
            files: files.iter().cloned().collect(),
        };

        let parallel = Pipeline::new(source(&files), RecordExtractor::new()).run(&paths);
        let sequential = Pipeline::new(source(&files), RecordExtractor::new())
            .with_parallel(false)
            .run(&paths);

        assert_eq!(parallel.records, sequential.records);
        assert_eq!(parallel.records[11].person.full_name, "PERSON 11");
    }

    #[test]
    fn test_output_field_shapes() {
        let source = MemorySource::new(vec![(
            "mixed.xlsx",
            vec![ten_column(vec![
                ("1", "A ONE", "Contact: 12345\nAddress: 1234567 Janakpuri", "98765"),
                ("2", "B TWO", "Address: Dwarka 110075", "+91 9876543210"),
                ("3", "C THREE", "Address: Sector 62 NOIDA 201309", "9876543210"),
            ])],
        )]);

        let report = Pipeline::new(source, RecordExtractor::new()).run(&[PathBuf::from("mixed.xlsx")]);
        let gazetteer = crate::extract::rules::Gazetteer::default();

        for record in &report.records {
            let p = &record.person;
            assert!(p.contact.is_empty() || (p.contact.len() == 10 && p.contact.chars().all(|c| c.is_ascii_digit())));
            assert!(p.pincode.is_empty() || (p.pincode.len() == 6 && p.pincode.chars().all(|c| c.is_ascii_digit())));
            assert!(p.city.is_empty() || gazetteer.contains(&p.city));
            assert!(!p.full_name.is_empty());
        }
        assert_eq!(report.records[0].person.contact, "");
        assert_eq!(report.records[0].person.pincode, "");
        assert_eq!(report.records[2].person.city, "Noida");
    }

    #[test]
    fn test_run_dir_missing() {
        let pipeline = Pipeline::new(MemorySource::new(vec![]), RecordExtractor::new());
        let err = pipeline
            .run_dir(Path::new("/definitely/not/here"), &["xlsx".to_string()])
            .unwrap_err();

        assert!(matches!(err, crate::RollcallError::InputDirMissing(_)));
    }
}
