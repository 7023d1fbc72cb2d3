//! Tables of text cells and the sources that produce them.

mod xlsx;

pub use xlsx::XlsxSource;

use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};
use tracing::debug;

use crate::error::{RollcallError, TableError};

/// A rectangular grid of text cells. Missing cells read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Human-readable origin, e.g. `part4.xlsx#Sheet1`.
    pub name: String,
    rows: Vec<Vec<String>>,
    num_cols: usize,
}

impl Table {
    /// Build a table, padding short rows to the widest row.
    pub fn new(name: impl Into<String>, mut rows: Vec<Vec<String>>) -> Self {
        let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(num_cols, String::new());
        }
        Self {
            name: name.into(),
            rows,
            num_cols,
        }
    }

    /// Convenience constructor from string slices.
    pub fn from_rows<R, S>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self::new(name, rows)
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.num_cols == 0
    }

    /// Cell text, or `""` when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// One column's cells in row order. Empty when `col` is out of range.
    pub fn column(&self, col: usize) -> Vec<&str> {
        if col >= self.num_cols {
            return Vec::new();
        }
        self.rows.iter().map(|r| r[col].as_str()).collect()
    }
}

/// Something that turns a file into tables.
pub trait TableSource: Sync {
    /// Read every table in the file, in a stable order.
    fn read_tables(&self, path: &Path) -> Result<Vec<Table>, TableError>;
}

/// List files in `dir` whose extension is one of `extensions`
/// (case-insensitive), sorted by path.
pub fn list_source_files(dir: &Path, extensions: &[String]) -> crate::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(RollcallError::InputDirMissing(dir.to_path_buf()));
    }

    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };
    let base = Pattern::escape(&dir.to_string_lossy());

    let mut files = Vec::new();
    for ext in extensions {
        let ext = ext.trim_start_matches('.');
        let pattern = format!("{}/*.{}", base, Pattern::escape(ext));
        let matches = glob_with(&pattern, options)
            .map_err(|e| RollcallError::Config(format!("invalid extension '{}': {}", ext, e)))?;
        files.extend(matches.filter_map(|r| r.ok()).filter(|p| p.is_file()));
    }

    files.sort();
    files.dedup();

    debug!("Found {} source files in {}", files.len(), dir.display());
    Ok(files)
}
