//! Spreadsheet table source backed by calamine.
//!
//! Supports XLSX, XLS, XLSM, XLSB and ODS. Leading empty columns are kept so
//! column offsets match the sheet's lettered columns (A = 0).

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::debug;

use super::{Table, TableSource};
use crate::error::TableError;
use crate::models::config::InputConfig;

/// Reads worksheets into [`Table`]s.
#[derive(Debug, Clone)]
pub struct XlsxSource {
    /// Drop the first used row of each sheet.
    header_row: bool,
    /// Read every sheet instead of only the first.
    all_sheets: bool,
}

impl XlsxSource {
    /// Create a source that skips the header row and reads the first sheet.
    pub fn new() -> Self {
        Self {
            header_row: true,
            all_sheets: false,
        }
    }

    /// Build from input configuration.
    pub fn from_config(config: &InputConfig) -> Self {
        Self::new()
            .with_header_row(config.header_row)
            .with_all_sheets(config.all_sheets)
    }

    /// Set whether the first used row is a header.
    pub fn with_header_row(mut self, header_row: bool) -> Self {
        self.header_row = header_row;
        self
    }

    /// Set whether all sheets are read.
    pub fn with_all_sheets(mut self, all_sheets: bool) -> Self {
        self.all_sheets = all_sheets;
        self
    }

    fn range_to_table(&self, name: String, range: &Range<Data>) -> Table {
        let Some((_, start_col)) = range.start() else {
            return Table::new(name, Vec::new());
        };
        let pad = start_col as usize;

        let rows = range
            .rows()
            .skip(usize::from(self.header_row))
            .map(|row| {
                let mut cells = vec![String::new(); pad];
                cells.extend(row.iter().map(cell_text));
                cells
            })
            .collect();

        Table::new(name, rows)
    }
}

impl Default for XlsxSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSource for XlsxSource {
    fn read_tables(&self, path: &Path) -> Result<Vec<Table>, TableError> {
        let mut workbook = open_workbook_auto(path).map_err(|e| TableError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(TableError::NoSheets);
        }

        let take = if self.all_sheets { sheet_names.len() } else { 1 };
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut tables = Vec::with_capacity(take);
        for sheet in sheet_names.into_iter().take(take) {
            let range = workbook
                .worksheet_range(&sheet)
                .map_err(|e| TableError::Sheet {
                    sheet: sheet.clone(),
                    reason: e.to_string(),
                })?;

            let table = self.range_to_table(format!("{}#{}", file_name, sheet), &range);
            debug!(
                "Read {} ({} rows x {} cols)",
                table.name,
                table.num_rows(),
                table.num_cols()
            );
            tables.push(table);
        }

        Ok(tables)
    }
}

/// Render a cell as text. Whole floats print without a fraction.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(_) => String::new(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}
