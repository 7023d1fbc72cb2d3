//! Layout classification by column count.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::structured::FieldOffsets;

/// Columns checked for merged cells in standard layouts.
pub const MERGED_COLUMNS: [usize; 2] = [0, 1];

/// Columns scanned for vertical spans in double-voter layouts.
pub const VERTICAL_COLUMNS: [usize; 2] = [8, 13];

/// Shape of a source table, derived from its column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Up to 3 columns: records smeared down each column.
    Narrow,
    /// Exactly 10 columns: one voter at offsets 6..=9.
    TenColumn,
    /// 12 to 16 columns: one voter at offsets 8..=11.
    Wide,
    /// More than 16 columns: two voters per row plus vertical spans.
    DoubleVoter,
    /// Anything else: only merged cells are checked.
    MergedOnly,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Narrow => "narrow",
            Self::TenColumn => "ten-column",
            Self::Wide => "wide",
            Self::DoubleVoter => "double-voter",
            Self::MergedOnly => "merged-only",
        };
        f.write_str(name)
    }
}

/// One extraction strategy bound to its table positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Fixed-offset columns, applied to every row.
    Structured(FieldOffsets),
    /// Merged cell in the given column, applied to every row.
    Merged { column: usize },
    /// Vertical span scan of one column.
    Vertical { column: usize },
    /// Two-column reconstruction of one column.
    Stitch { column: usize },
}

impl Strategy {
    /// Row-scoped strategies run row by row before any column scan.
    pub fn is_row_scoped(&self) -> bool {
        matches!(self, Self::Structured(_) | Self::Merged { .. })
    }
}

/// Strategies selected for a table, in application order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub layout: Layout,
    pub strategies: Vec<Strategy>,
}

/// Select strategies for a table with `num_cols` columns.
pub fn classify(num_cols: usize) -> LayoutPlan {
    let merged = MERGED_COLUMNS.map(|column| Strategy::Merged { column });

    let (layout, strategies) = match num_cols {
        0..=3 => (
            Layout::Narrow,
            (0..num_cols).map(|column| Strategy::Stitch { column }).collect(),
        ),
        10 => {
            let mut s = vec![Strategy::Structured(FieldOffsets::TEN_COLUMN)];
            s.extend(merged);
            (Layout::TenColumn, s)
        }
        12..=16 => {
            let mut s = vec![Strategy::Structured(FieldOffsets::FIRST_VOTER)];
            s.extend(merged);
            (Layout::Wide, s)
        }
        n if n > 16 => {
            let mut s = vec![
                Strategy::Structured(FieldOffsets::FIRST_VOTER),
                Strategy::Structured(FieldOffsets::SECOND_VOTER),
            ];
            s.extend(merged);
            s.extend(VERTICAL_COLUMNS.map(|column| Strategy::Vertical { column }));
            (Layout::DoubleVoter, s)
        }
        _ => (Layout::MergedOnly, merged.to_vec()),
    };

    LayoutPlan { layout, strategies }
}
