//! Person record extraction from tables.

pub mod layout;
pub mod merged;
pub mod rules;
pub mod stitch;
pub mod structured;
pub mod vertical;

pub use layout::{classify, Layout, LayoutPlan, Strategy};
pub use structured::{FieldOffsets, StructuredCells};

use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::record::Candidate;
use crate::table::Table;

use self::rules::Gazetteer;

/// Candidates recovered from one table.
#[derive(Debug, Clone)]
pub struct TableExtraction {
    /// Table origin.
    pub table: String,
    /// Layout the table was classified as.
    pub layout: Layout,
    /// Candidates in discovery order.
    pub candidates: Vec<Candidate>,
}

/// Applies layout-selected strategies to tables.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    gazetteer: Gazetteer,
    missing_sentinel: String,
    lookahead_window: usize,
    min_name_len: usize,
}

impl RecordExtractor {
    /// Create an extractor with the default gazetteer and thresholds.
    pub fn new() -> Self {
        Self {
            gazetteer: Gazetteer::default(),
            missing_sentinel: "nan".to_string(),
            lookahead_window: 4,
            min_name_len: 3,
        }
    }

    /// Build from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_gazetteer(Gazetteer::new(&config.gazetteer))
            .with_missing_sentinel(config.missing_sentinel.clone())
            .with_lookahead_window(config.lookahead_window)
            .with_min_name_len(config.min_name_len)
    }

    /// Set the locality gazetteer.
    pub fn with_gazetteer(mut self, gazetteer: Gazetteer) -> Self {
        self.gazetteer = gazetteer;
        self
    }

    /// Set the cell text that means "no value".
    pub fn with_missing_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.missing_sentinel = sentinel.into();
        self
    }

    /// Set how many cells a vertical span looks ahead.
    pub fn with_lookahead_window(mut self, window: usize) -> Self {
        self.lookahead_window = window;
        self
    }

    /// Set the shortest name the two-column reconstructor accepts.
    pub fn with_min_name_len(mut self, len: usize) -> Self {
        self.min_name_len = len;
        self
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    pub fn lookahead_window(&self) -> usize {
        self.lookahead_window
    }

    pub fn min_name_len(&self) -> usize {
        self.min_name_len
    }

    /// Whether a cell is empty, blank or the missing-value sentinel.
    pub fn is_missing(&self, cell: &str) -> bool {
        let cell = cell.trim();
        cell.is_empty() || cell == self.missing_sentinel
    }

    /// Classify `table` and run every selected strategy over it.
    ///
    /// Row-scoped strategies run first, row by row; column scans follow in
    /// plan order.
    pub fn extract_table(&self, table: &Table) -> TableExtraction {
        let plan = classify(table.num_cols());
        let (row_scoped, column_scoped): (Vec<Strategy>, Vec<Strategy>) =
            plan.strategies.into_iter().partition(|s| s.is_row_scoped());

        let mut candidates = Vec::new();

        for row in 0..table.num_rows() {
            for strategy in &row_scoped {
                let candidate = match *strategy {
                    Strategy::Structured(offsets) => structured::parse_structured(
                        self,
                        StructuredCells::from_row(table, row, offsets),
                    ),
                    Strategy::Merged { column } => merged::parse_merged(self, table.cell(row, column)),
                    _ => None,
                };
                candidates.extend(candidate);
            }
        }

        for strategy in &column_scoped {
            let found = match *strategy {
                Strategy::Vertical { column } => vertical::parse_vertical(self, &table.column(column)),
                Strategy::Stitch { column } => stitch::parse_stitched(self, &table.column(column)),
                _ => Vec::new(),
            };
            debug!("{}: {:?} found {} candidates", table.name, strategy, found.len());
            candidates.extend(found);
        }

        debug!(
            "{}: {} layout, {} candidates",
            table.name,
            plan.layout,
            candidates.len()
        );

        TableExtraction {
            table: table.name.clone(),
            layout: plan.layout,
            candidates,
        }
    }
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::SourceKind;
    use pretty_assertions::assert_eq;

    fn ten_column_row(serial: &str, name: &str, info: &str, phone: &str) -> Vec<String> {
        let mut row = vec![String::new(); 10];
        row[6] = serial.to_string();
        row[7] = name.to_string();
        row[8] = info.to_string();
        row[9] = phone.to_string();
        row
    }

    #[test]
    fn test_ten_column_table() {
        let table = Table::new(
            "part4.xlsx#Sheet1",
            vec![ten_column_row(
                "77",
                "RAM KUMAR",
                "Address: H.No 12, Sector 5, Noida 201301",
                "9876543210",
            )],
        );

        let result = RecordExtractor::new().extract_table(&table);
        assert_eq!(result.layout, Layout::TenColumn);
        assert_eq!(result.candidates.len(), 1);

        let person = &result.candidates[0].person;
        assert_eq!(person.full_name, "RAM KUMAR");
        assert_eq!(person.contact, "9876543210");
        assert_eq!(person.pincode, "201301");
        assert_eq!(person.city, "Noida");
    }

    #[test]
    fn test_row_strategies_interleave() {
        let mut row = ten_column_row("1", "ASHA", "", "9000000001");
        row[0] = "5 RAJ D/ X\nContact: 9000000002".to_string();

        let table = Table::new("t", vec![row, ten_column_row("2", "VIJAY", "", "")]);
        let result = RecordExtractor::new().extract_table(&table);

        let names: Vec<_> = result
            .candidates
            .iter()
            .map(|c| (c.person.full_name.as_str(), c.source))
            .collect();
        assert_eq!(
            names,
            vec![
                ("ASHA", SourceKind::Structured),
                ("RAJ", SourceKind::Merged),
                ("VIJAY", SourceKind::Structured),
            ]
        );
    }

    #[test]
    fn test_double_voter_table_with_vertical_span() {
        let mut first = vec![String::new(); 17];
        first[8] = "10".into();
        first[9] = "ANIL".into();
        first[11] = "9111111111".into();
        first[13] = "11".into();
        first[14] = "SUNITA".into();
        first[16] = "9222222222".into();

        let mut span_start = vec![String::new(); 17];
        span_start[8] = "12\nKAMLA DEVI".into();
        let mut span_contact = vec![String::new(); 17];
        span_contact[8] = "Contact: 9333333333".into();

        let table = Table::new("t", vec![first, span_start, span_contact]);
        let result = RecordExtractor::new().extract_table(&table);

        assert_eq!(result.layout, Layout::DoubleVoter);
        assert_eq!(result.candidates.len(), 3);
        let kamla = result
            .candidates
            .iter()
            .find(|c| c.source == SourceKind::Vertical)
            .unwrap();
        assert_eq!(kamla.person.full_name, "KAMLA DEVI");
        assert_eq!(kamla.person.contact, "9333333333");
        assert_eq!(result.candidates[0].person.full_name, "ANIL");
        assert_eq!(result.candidates[1].person.full_name, "SUNITA");
    }

    #[test]
    fn test_narrow_table_stitches_columns() {
        let table = Table::from_rows(
            "part20.xlsx#Sheet1",
            vec![
                vec!["63670\nSANDEEP KUMAR", "MEENA"],
                vec!["Contact: 9988776655", "Address: Kalkaji"],
                vec!["Address: House 4 Saket", ""],
            ],
        );

        let result = RecordExtractor::new().extract_table(&table);
        assert_eq!(result.layout, Layout::Narrow);
        assert_eq!(result.candidates.len(), 2);
        assert_eq!(result.candidates[0].person.city, "Saket");
        assert_eq!(result.candidates[1].person.city, "Kalkaji");
    }

    #[test]
    fn test_from_config() {
        let mut config = ExtractionConfig::default();
        config.missing_sentinel = "-".to_string();
        config.gazetteer = vec!["JAIPUR".to_string()];

        let extractor = RecordExtractor::from_config(&config);
        assert!(extractor.is_missing(" - "));
        assert!(!extractor.is_missing("nan"));
        assert_eq!(extractor.gazetteer().len(), 1);
    }
}
