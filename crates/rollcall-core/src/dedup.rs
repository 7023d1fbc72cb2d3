//! Global deduplication and final id assignment.

use std::collections::HashSet;

use tracing::debug;

use crate::models::record::{Candidate, Person, Record};

/// Width of final ids.
pub const ID_WIDTH: usize = 6;

/// Keep the first person per identity key, in input order, and number the
/// survivors `000001`, `000002`, ...
///
/// Tentative ids are dropped here.
pub fn deduplicate<I>(candidates: I) -> Vec<Record>
where
    I: IntoIterator<Item = Candidate>,
{
    assign_ids(candidates.into_iter().map(|c| c.person))
}

/// Re-run deduplication over already finalized records, renumbering them.
///
/// Running this on the output of [`deduplicate`] returns the same records.
pub fn rededuplicate<I>(records: I) -> Vec<Record>
where
    I: IntoIterator<Item = Record>,
{
    assign_ids(records.into_iter().map(|r| r.person))
}

fn assign_ids<I>(people: I) -> Vec<Record>
where
    I: Iterator<Item = Person>,
{
    let mut seen = HashSet::new();
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for person in people {
        if !seen.insert(person.identity_key()) {
            dropped += 1;
            continue;
        }
        records.push(Record {
            id: format_id(records.len() + 1),
            person,
        });
    }

    debug!("Deduplicated to {} records ({} duplicates dropped)", records.len(), dropped);
    records
}

/// Zero-padded decimal id for a 1-based rank.
pub fn format_id(rank: usize) -> String {
    format!("{:0width$}", rank, width = ID_WIDTH)
}
