//! Marker rules: `Address:`, `Contact:` and the `D/` guardian marker, plus
//! the serial/name heads that open a record.
//!
//! Every rule returns `None` (or `false`) when its precondition does not hold.

use super::normalize_whitespace;
use super::patterns::{
    ADDRESS_BEFORE_PHONE, ADDRESS_TAIL, CAPS_LINE, NAME_BEFORE_GUARDIAN, SERIAL_CAPS_NAME,
    SERIAL_LINE, SERIAL_NEWLINE_CAPS_NAME, SERIAL_PREFIX,
};

pub const CONTACT_MARKER: &str = "Contact:";
pub const ADDRESS_MARKER: &str = "Address:";

/// Serial number and name recovered from the head of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialName<'a> {
    pub serial: &'a str,
    pub name: &'a str,
}

pub fn has_contact_marker(text: &str) -> bool {
    text.contains(CONTACT_MARKER)
}

pub fn has_address_marker(text: &str) -> bool {
    text.contains(ADDRESS_MARKER)
}

/// Whether the cell contains either marker anywhere.
pub fn has_any_marker(text: &str) -> bool {
    has_contact_marker(text) || has_address_marker(text)
}

/// Whether the cell is a pure marker line (starts with a marker).
pub fn is_marker_line(text: &str) -> bool {
    let text = text.trim_start();
    text.starts_with(CONTACT_MARKER) || text.starts_with(ADDRESS_MARKER)
}

/// Address text after the first `Address:` marker through end of text.
pub fn address_after_marker(text: &str) -> Option<String> {
    ADDRESS_TAIL
        .captures(text)
        .map(|caps| normalize_whitespace(&caps[1]))
}

/// Address text after `Address:` up to the next 10-digit run or end of text.
pub fn address_before_phone(text: &str) -> Option<String> {
    ADDRESS_BEFORE_PHONE
        .captures(text)
        .map(|caps| normalize_whitespace(&caps[1]))
}

/// Merged-cell head: serial, whitespace, then a name ending at ` D/`.
///
/// The name cannot span lines and must be non-empty.
pub fn guardian_head(text: &str) -> Option<SerialName<'_>> {
    let serial = SERIAL_PREFIX.captures(text)?;
    let serial_match = serial.get(1)?;
    let rest = &text[serial.get(0)?.end()..];

    let name = NAME_BEFORE_GUARDIAN.captures(rest)?.get(1)?.as_str().trim();
    if name.is_empty() {
        return None;
    }

    Some(SerialName {
        serial: serial_match.as_str(),
        name,
    })
}

/// Serial followed by whitespace (spaces or newline) and an all-caps name.
pub fn serial_caps_head(text: &str) -> Option<SerialName<'_>> {
    let caps = SERIAL_CAPS_NAME.captures(text)?;
    Some(SerialName {
        serial: caps.get(1)?.as_str(),
        name: caps.get(2)?.as_str().trim(),
    })
}

/// Serial line, then an all-caps name on a following line.
pub fn serial_line_caps_head(text: &str) -> Option<SerialName<'_>> {
    let caps = SERIAL_NEWLINE_CAPS_NAME.captures(text)?;
    Some(SerialName {
        serial: caps.get(1)?.as_str(),
        name: caps.get(2)?.as_str().trim(),
    })
}

/// Whether the cell opens with a serial number on its own line.
pub fn starts_with_serial_line(text: &str) -> bool {
    SERIAL_LINE.is_match(text)
}

/// Whether the trimmed cell is a standalone all-caps line of 6+ characters.
pub fn is_caps_line(text: &str) -> bool {
    CAPS_LINE.is_match(text.trim())
}
