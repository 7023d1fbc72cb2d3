//! Rule-based field extractors for roll cells.

pub mod address;
pub mod contact;
pub mod markers;
pub mod patterns;

pub use address::{extract_city, extract_pincode, Gazetteer, DEFAULT_GAZETTEER};
pub use contact::{contact_after_marker, normalize_phone, CONTACT_LEN};
pub use markers::*;

/// Collapse every whitespace run (newlines included) into one space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
