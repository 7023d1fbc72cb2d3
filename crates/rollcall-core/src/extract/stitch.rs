//! Two-column reconstruction: rebuild records smeared down one column as
//! name cell, optional `Contact:` cell, then an `Address:` cell with any
//! number of continuation cells.

use std::collections::HashSet;

use crate::models::record::{Candidate, Person, SourceKind};

use super::rules::{
    address_after_marker, contact_after_marker, has_address_marker, has_any_marker,
    has_contact_marker, is_caps_line, is_marker_line, normalize_whitespace,
    serial_line_caps_head, starts_with_serial_line,
};
use super::RecordExtractor;

/// Scan one column top to bottom.
///
/// An emitted record moves the scan past every cell it consumed; anything
/// else (rejection or duplicate key) moves it by one, so a malformed start
/// can still be recovered from the next cell.
pub fn parse_stitched(ctx: &RecordExtractor, cells: &[&str]) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    let mut i = 0;
    while i < cells.len() {
        match stitch_at(ctx, cells, i) {
            Some((candidate, consumed)) if seen.insert(candidate.person.identity_key()) => {
                candidates.push(candidate);
                i += consumed;
            }
            _ => i += 1,
        }
    }

    candidates
}

/// Try to rebuild one record starting at `start`. Returns the candidate and
/// the number of cells it spans.
fn stitch_at(ctx: &RecordExtractor, cells: &[&str], start: usize) -> Option<(Candidate, usize)> {
    let cell = cells[start];
    if ctx.is_missing(cell) || is_marker_line(cell) {
        return None;
    }

    let (serial, name) = match serial_line_caps_head(cell) {
        Some(head) => (head.serial, head.name),
        None => ("", cell.trim()),
    };

    if name.chars().count() < ctx.min_name_len() || name.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut consumed = 1;

    let mut contact = String::new();
    if cells.get(start + 1).is_some_and(|next| has_contact_marker(next)) {
        contact = contact_after_marker(cells[start + 1]);
        consumed = 2;
    }

    let mut address = String::new();
    if cells.get(start + consumed).is_some_and(|next| has_address_marker(next)) {
        address = address_after_marker(cells[start + consumed]).unwrap_or_default();
        consumed += 1;

        while let Some(next) = cells.get(start + consumed) {
            if !continues_address(ctx, next) {
                break;
            }
            if !address.is_empty() {
                address.push(' ');
            }
            address.push_str(&normalize_whitespace(next));
            consumed += 1;
        }
    }

    // a bare name is too ambiguous to keep
    if contact.is_empty() && address.is_empty() {
        return None;
    }

    let person = Person::new(name, contact, address, ctx.gazetteer())?;
    Some((Candidate::new(serial, person, SourceKind::Stitched), consumed))
}

/// Whether `cell` extends the address being built.
///
/// An all-caps line of 6+ characters is read as the next name, which can
/// misfile an all-caps address fragment.
fn continues_address(ctx: &RecordExtractor, cell: &str) -> bool {
    let text = cell.trim();
    !ctx.is_missing(text)
        && !has_any_marker(text)
        && !starts_with_serial_line(cell)
        && !is_caps_line(text)
        && !text.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serial_name_contact_address() {
        let ctx = RecordExtractor::new();
        let column = vec!["63670\nSANDEEP KUMAR", "Contact: 9988776655", "Address: House 4 Saket"];

        let candidates = parse_stitched(&ctx, &column);
        assert_eq!(candidates.len(), 1);

        let person = &candidates[0].person;
        assert_eq!(person.full_name, "SANDEEP KUMAR");
        assert_eq!(person.contact, "9988776655");
        assert_eq!(person.address, "House 4 Saket");
        assert_eq!(person.city, "Saket");
    }

    #[test]
    fn test_address_continuations() {
        let ctx = RecordExtractor::new();
        let column = vec![
            "Ramesh Chand",
            "Address: B-12, Lajpat",
            "Nagar, near market",
            "110024",
            "New Delhi",
        ];

        let candidates = parse_stitched(&ctx, &column);
        assert_eq!(candidates.len(), 1);

        let person = &candidates[0].person;
        assert_eq!(person.full_name, "Ramesh Chand");
        assert_eq!(person.contact, "");
        assert_eq!(person.address, "B-12, Lajpat Nagar, near market");
        assert_eq!(person.city, "Lajpat Nagar");
    }

    #[test]
    fn test_caps_line_stops_address() {
        let ctx = RecordExtractor::new();
        let column = vec![
            "63670\nSANDEEP KUMAR",
            "Contact: 9988776655",
            "Address: House 4",
            "MAHESH SHARMA",
            "Contact: 9000000001",
        ];

        let candidates = parse_stitched(&ctx, &column);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].person.address, "House 4");
        assert_eq!(candidates[1].person.full_name, "MAHESH SHARMA");
        assert_eq!(candidates[1].person.contact, "9000000001");
    }

    #[test]
    fn test_serial_line_stops_address() {
        let ctx = RecordExtractor::new();
        let column = vec![
            "1\nASHA RANI",
            "Address: Sector 9 Dwarka",
            "2\nVIJAY PAL",
            "Contact: 9123456780",
        ];

        let candidates = parse_stitched(&ctx, &column);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].person.city, "Dwarka");
        assert_eq!(candidates[1].person.full_name, "VIJAY PAL");
    }

    #[test]
    fn test_bare_names_discarded() {
        let ctx = RecordExtractor::new();
        let column = vec!["SANDEEP KUMAR", "nan", "MEENA DEVI", "Ward No. 4"];

        assert!(parse_stitched(&ctx, &column).is_empty());
    }

    #[test]
    fn test_short_and_numeric_names_rejected() {
        let ctx = RecordExtractor::new();
        let column = vec!["AB", "Contact: 9988776655", "12345", "Contact: 9988776655"];

        assert!(parse_stitched(&ctx, &column).is_empty());
    }

    #[test]
    fn test_rejected_start_retries_next_cell() {
        let ctx = RecordExtractor::new();
        // "Ward 4" has no contact/address after it; "RAVI" does
        let column = vec!["Ward 4", "RAVI", "Contact: 9123456780"];

        let candidates = parse_stitched(&ctx, &column);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].person.full_name, "RAVI");
    }

    #[test]
    fn test_duplicate_key_in_column() {
        let ctx = RecordExtractor::new();
        let column = vec![
            "RAVI",
            "Contact: 9123456780",
            "RAVI",
            "Contact: 9123456780",
        ];

        let candidates = parse_stitched(&ctx, &column);
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_invalid_contact_still_consumed() {
        let ctx = RecordExtractor::new();
        let column = vec!["RAVI", "Contact: 91234", "Address: Pitampura"];

        let candidates = parse_stitched(&ctx, &column);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].person.contact, "");
        assert_eq!(candidates[0].person.city, "Pitampura");
    }
}
