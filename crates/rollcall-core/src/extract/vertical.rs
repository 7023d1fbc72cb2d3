//! Vertical spans: a serial+name cell followed, within a short window, by
//! `Contact:` and `Address:` cells of the same column.

use std::collections::HashSet;

use crate::models::record::{Candidate, Person, SourceKind};

use super::rules::{
    address_after_marker, contact_after_marker, has_address_marker, has_any_marker,
    has_contact_marker, serial_caps_head,
};
use super::RecordExtractor;

/// Scan one column top to bottom. Never emits two candidates with the same
/// identity key.
pub fn parse_vertical(ctx: &RecordExtractor, cells: &[&str]) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for (i, cell) in cells.iter().enumerate() {
        // marker cells are consumed through the lookahead of an earlier start
        if ctx.is_missing(cell) || has_any_marker(cell) {
            continue;
        }

        let Some(head) = serial_caps_head(cell) else {
            continue;
        };

        let mut contact: Option<String> = None;
        let mut address: Option<String> = None;
        for next in cells.iter().skip(i + 1).take(ctx.lookahead_window()) {
            if contact.is_none() && has_contact_marker(next) {
                contact = Some(contact_after_marker(next));
            }
            if address.is_none() && has_address_marker(next) {
                address = Some(address_after_marker(next).unwrap_or_default());
            }
        }

        let Some(person) = Person::new(
            head.name,
            contact.unwrap_or_default(),
            address.unwrap_or_default(),
            ctx.gazetteer(),
        ) else {
            continue;
        };

        if seen.insert(person.identity_key()) {
            candidates.push(Candidate::new(head.serial, person, SourceKind::Vertical));
        }
    }

    candidates
}
