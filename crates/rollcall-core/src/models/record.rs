//! Person record models.
//!
//! Strategies produce [`Candidate`]s carrying a non-authoritative tentative id.
//! Only the deduplicator turns candidates into [`Record`]s with final ids.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::extract::rules::{extract_city, extract_pincode, Gazetteer};

/// Fields recovered for one person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// First whitespace token of the full name.
    pub first_name: String,

    /// Remaining name tokens joined by a single space.
    pub last_name: String,

    /// Name as recovered from the source, trimmed.
    pub full_name: String,

    /// Empty or exactly 10 ASCII digits.
    pub contact: String,

    /// Whitespace-normalized address text.
    pub address: String,

    /// Empty or exactly 6 ASCII digits.
    pub pincode: String,

    /// Empty or a title-cased gazetteer entry.
    pub city: String,
}

impl Person {
    /// Build a person from a full name, contact and address, deriving the
    /// name split, pincode and city.
    ///
    /// Returns `None` when the trimmed name is empty.
    pub fn new(
        full_name: &str,
        contact: impl Into<String>,
        address: impl Into<String>,
        gazetteer: &Gazetteer,
    ) -> Option<Self> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return None;
        }

        let mut tokens = full_name.split_whitespace();
        let first_name = tokens.next().unwrap_or_default().to_string();
        let last_name = tokens.collect::<Vec<_>>().join(" ");

        let address = address.into();
        let pincode = extract_pincode(&address);
        let city = extract_city(&address, gazetteer);

        Some(Self {
            first_name,
            last_name,
            full_name: full_name.to_string(),
            contact: contact.into(),
            address,
            pincode,
            city,
        })
    }

    /// Identity key used for deduplication: full name followed by contact.
    pub fn identity_key(&self) -> String {
        format!("{}{}", self.full_name, self.contact)
    }
}

/// Which strategy recovered a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Fixed-offset structured columns.
    Structured,
    /// Single merged cell.
    Merged,
    /// Vertical span with lookahead.
    Vertical,
    /// Two-column row stitching.
    Stitched,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Structured => "structured",
            Self::Merged => "merged",
            Self::Vertical => "vertical",
            Self::Stitched => "stitched",
        };
        f.write_str(name)
    }
}

/// A record as emitted by one strategy, before deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Collision-prone id, never used as an identity.
    pub tentative_id: String,

    /// Recovered fields.
    pub person: Person,

    /// Strategy that produced this candidate.
    pub source: SourceKind,
}

impl Candidate {
    /// Wrap a person, hashing `serial` with the name and contact into a
    /// 5-digit tentative id.
    pub fn new(serial: &str, person: Person, source: SourceKind) -> Self {
        Self {
            tentative_id: tentative_id(serial, &person.full_name, &person.contact),
            person,
            source,
        }
    }
}

fn tentative_id(serial: &str, full_name: &str, contact: &str) -> String {
    let mut hasher = DefaultHasher::new();
    serial.hash(&mut hasher);
    full_name.hash(&mut hasher);
    contact.hash(&mut hasher);
    format!("{:05}", hasher.finish() % 100_000)
}

/// A final, deduplicated record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Dense 6-digit identifier.
    pub id: String,

    #[serde(flatten)]
    pub person: Person,
}

impl Record {
    /// Identity key of the underlying person.
    pub fn identity_key(&self) -> String {
        self.person.identity_key()
    }
}
