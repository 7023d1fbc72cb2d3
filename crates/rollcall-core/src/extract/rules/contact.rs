//! Mobile contact number extraction.

use super::patterns::CONTACT_MARKER;

/// Length of a valid contact number.
pub const CONTACT_LEN: usize = 10;

/// Digits following the first `Contact:` marker that carries exactly 10 of
/// them, or an empty string.
pub fn contact_after_marker(text: &str) -> String {
    CONTACT_MARKER
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .find(|digits| digits.as_str().len() == CONTACT_LEN)
        .map(|digits| digits.as_str().to_string())
        .unwrap_or_default()
}

/// Strip every non-digit from a phone cell and keep it only when exactly
/// 10 digits remain.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == CONTACT_LEN {
        digits
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("9876543210"), "9876543210");
        assert_eq!(normalize_phone("+91 98765-43210"), "");
        assert_eq!(normalize_phone("98765 43210"), "9876543210");
        assert_eq!(normalize_phone("(987) 654-3210"), "9876543210");
    }

    #[test]
    fn test_normalize_phone_rejects_wrong_length() {
        assert_eq!(normalize_phone("98765"), "");
        assert_eq!(normalize_phone("98765432101"), "");
        assert_eq!(normalize_phone(""), "");
        assert_eq!(normalize_phone("nan"), "");
    }

    #[test]
    fn test_contact_after_marker() {
        assert_eq!(contact_after_marker("Contact: 9123456780"), "9123456780");
        assert_eq!(contact_after_marker("xx\nContact:9123456780\nAddress: y"), "9123456780");
        assert_eq!(contact_after_marker("Contact: 91234"), "");
        assert_eq!(contact_after_marker("Contact: 912345678012"), "");
        assert_eq!(contact_after_marker("Phone 9123456780"), "");
    }

    #[test]
    fn test_contact_skips_invalid_first_marker() {
        let text = "Contact: 123\nContact: 9988776655";
        assert_eq!(contact_after_marker(text), "9988776655");
    }
}
