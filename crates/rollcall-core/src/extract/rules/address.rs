//! Pincode and locality extraction from free-text addresses.

use std::path::Path;

use super::patterns::DIGIT_RUN;

/// Default locality names, in matching priority order.
pub const DEFAULT_GAZETTEER: &[&str] = &[
    "DELHI",
    "NOIDA",
    "GURGAON",
    "GURUGRAM",
    "FARIDABAD",
    "GHAZIABAD",
    "GREATER NOIDA",
    "KALKAJI",
    "SAKET",
    "LAJPAT NAGAR",
    "CHHALERA",
    "ROHINI",
    "DWARKA",
    "JANAKPURI",
    "PITAMPURA",
    "PUNJABI BAGH",
];

/// Ordered list of known locality names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gazetteer {
    /// (case-folded entry, title-cased entry)
    entries: Vec<(String, String)>,
}

impl Gazetteer {
    /// Build a gazetteer from entries in priority order. Blank entries are dropped.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_string())
            .filter(|e| !e.is_empty())
            .map(|e| (e.to_lowercase(), title_case(&e)))
            .collect();
        Self { entries }
    }

    /// Load one entry per line. Lines starting with `#` are comments.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(
            content.lines().filter(|l| !l.trim_start().starts_with('#')),
        ))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Title-cased entries in priority order.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, title)| title.as_str())
    }

    /// First entry, in priority order, found anywhere in `text` ignoring case.
    pub fn find(&self, text: &str) -> Option<&str> {
        let folded = text.to_lowercase();
        self.entries
            .iter()
            .find(|(needle, _)| folded.contains(needle.as_str()))
            .map(|(_, title)| title.as_str())
    }

    /// Whether `city` is one of the title-cased entries.
    pub fn contains(&self, city: &str) -> bool {
        self.entries().any(|e| e == city)
    }
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::new(DEFAULT_GAZETTEER)
    }
}

/// Extract the first standalone 6-digit pincode, or an empty string.
pub fn extract_pincode(text: &str) -> String {
    // digit runs are maximal, so a 6-long run is bounded by non-digits
    DIGIT_RUN
        .find_iter(text)
        .find(|m| m.as_str().len() == 6)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Extract the highest-priority gazetteer locality found in `text`, or an empty string.
pub fn extract_city(text: &str, gazetteer: &Gazetteer) -> String {
    gazetteer.find(text).map(str::to_string).unwrap_or_default()
}

/// Uppercase the first letter of every alphabetic word, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
