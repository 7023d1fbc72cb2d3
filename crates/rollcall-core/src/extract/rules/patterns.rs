//! Common regex patterns for roll cell extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Any run of ASCII digits; callers filter by length
    pub static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]+").unwrap();

    // "Contact: 9876543210" (length checked by the caller)
    pub static ref CONTACT_MARKER: Regex = Regex::new(
        r"Contact:\s*([0-9]+)"
    ).unwrap();

    // Everything after the first "Address:" marker, across lines
    pub static ref ADDRESS_TAIL: Regex = Regex::new(
        r"(?s)Address:\s*(.*)"
    ).unwrap();

    // Address text up to the next 10-digit run or end of text
    pub static ref ADDRESS_BEFORE_PHONE: Regex = Regex::new(
        r"(?s)Address:\s*(.*?)(?:\s*[0-9]{10}|\z)"
    ).unwrap();

    // Leading serial number of a merged cell
    pub static ref SERIAL_PREFIX: Regex = Regex::new(
        r"^\s*([0-9]+)\s+"
    ).unwrap();

    // Single-line name preceding the "D/" guardian marker
    pub static ref NAME_BEFORE_GUARDIAN: Regex = Regex::new(
        r"^(.*?)\s+D/"
    ).unwrap();

    // "60003\nSUKANTA SARKAR" or "60003 SUKANTA SARKAR"; the name stays on one line
    pub static ref SERIAL_CAPS_NAME: Regex = Regex::new(
        r"^\s*([0-9]+)\s+([A-Z][A-Z ]+)"
    ).unwrap();

    // Serial and name strictly on separate lines
    pub static ref SERIAL_NEWLINE_CAPS_NAME: Regex = Regex::new(
        r"^\s*([0-9]+)\s*\n\s*([A-Z][A-Z ]+)"
    ).unwrap();

    // A cell that opens with a serial line
    pub static ref SERIAL_LINE: Regex = Regex::new(
        r"^\s*[0-9]+\s*\n"
    ).unwrap();

    // Standalone all-caps line of 6+ characters
    pub static ref CAPS_LINE: Regex = Regex::new(
        r"^[A-Z][A-Z\s]{5,}$"
    ).unwrap();
}
