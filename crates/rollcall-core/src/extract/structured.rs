//! Fixed-offset structured columns: serial, name, info block, phone.

use crate::models::record::{Candidate, Person, SourceKind};
use crate::table::Table;

use super::rules::{address_after_marker, contact_after_marker, normalize_phone};
use super::RecordExtractor;

/// Column offsets of one structured record within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOffsets {
    pub serial: usize,
    pub name: usize,
    pub info: usize,
    pub phone: usize,
}

impl FieldOffsets {
    /// Layout of 10-column sheets.
    pub const TEN_COLUMN: Self = Self::at(6);
    /// First voter of wide sheets.
    pub const FIRST_VOTER: Self = Self::at(8);
    /// Second voter of wide sheets, same row.
    pub const SECOND_VOTER: Self = Self::at(13);

    /// Four consecutive columns starting at `serial`.
    pub const fn at(serial: usize) -> Self {
        Self {
            serial,
            name: serial + 1,
            info: serial + 2,
            phone: serial + 3,
        }
    }
}

/// The four raw cells of a structured record.
#[derive(Debug, Clone, Copy)]
pub struct StructuredCells<'a> {
    pub serial: &'a str,
    pub name: &'a str,
    pub info: &'a str,
    pub phone: &'a str,
}

impl<'a> StructuredCells<'a> {
    /// Pick the cells at `offsets` from one table row.
    pub fn from_row(table: &'a Table, row: usize, offsets: FieldOffsets) -> Self {
        Self {
            serial: table.cell(row, offsets.serial),
            name: table.cell(row, offsets.name),
            info: table.cell(row, offsets.info),
            phone: table.cell(row, offsets.phone),
        }
    }
}

/// Parse one structured record. Returns `None` when the name is missing.
pub fn parse_structured(ctx: &RecordExtractor, cells: StructuredCells<'_>) -> Option<Candidate> {
    if ctx.is_missing(cells.name) {
        return None;
    }

    let info = if ctx.is_missing(cells.info) { "" } else { cells.info };

    let mut contact = normalize_phone(cells.phone);
    if contact.is_empty() {
        contact = contact_after_marker(info);
    }

    let address = address_after_marker(info).unwrap_or_default();

    let person = Person::new(cells.name, contact, address, ctx.gazetteer())?;
    Some(Candidate::new(cells.serial.trim(), person, SourceKind::Structured))
}
