//! Merged cells: serial, name, `D/` guardian, contact and address in one cell.

use crate::models::record::{Candidate, Person, SourceKind};

use super::rules::{address_before_phone, contact_after_marker, guardian_head};
use super::RecordExtractor;

/// Parse one merged cell, e.g.
/// `"60003\nSUKANTA SARKAR D/ Late Ram\nContact: 9123456780\nAddress: ..."`.
pub fn parse_merged(ctx: &RecordExtractor, cell: &str) -> Option<Candidate> {
    if ctx.is_missing(cell) {
        return None;
    }

    let head = guardian_head(cell)?;
    let contact = contact_after_marker(cell);
    let address = address_before_phone(cell).unwrap_or_default();

    let person = Person::new(head.name, contact, address, ctx.gazetteer())?;
    Some(Candidate::new(head.serial, person, SourceKind::Merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_merged_cell() {
        let ctx = RecordExtractor::new();
        let cell = "60003\nSUKANTA SARKAR D/ Late Ram\nContact: 9123456780\nAddress: Block C, Rohini, Delhi 110085";

        let candidate = parse_merged(&ctx, cell).unwrap();
        let person = &candidate.person;

        assert_eq!(person.full_name, "SUKANTA SARKAR");
        assert_eq!(person.first_name, "SUKANTA");
        assert_eq!(person.last_name, "SARKAR");
        assert_eq!(person.contact, "9123456780");
        assert_eq!(person.address, "Block C, Rohini, Delhi 110085");
        assert_eq!(person.pincode, "110085");
        assert_eq!(person.city, "Delhi");
    }

    #[test]
    fn test_address_stops_at_phone_run() {
        let ctx = RecordExtractor::new();
        let cell = "12 PRIYA D/ 01-02-1980\nAddress: 4 Saket\n  Main Road 9123456780";

        let candidate = parse_merged(&ctx, cell).unwrap();
        assert_eq!(candidate.person.address, "4 Saket Main Road");
        assert_eq!(candidate.person.contact, "");
        assert_eq!(candidate.person.city, "Saket");
    }

    #[test]
    fn test_contact_only() {
        let ctx = RecordExtractor::new();
        let candidate = parse_merged(&ctx, "5  RAJ D/ X Contact: 9000000001").unwrap();

        assert_eq!(candidate.person.full_name, "RAJ");
        assert_eq!(candidate.person.contact, "9000000001");
        assert_eq!(candidate.person.address, "");
    }

    #[test]
    fn test_rejections() {
        let ctx = RecordExtractor::new();
        assert!(parse_merged(&ctx, "").is_none());
        assert!(parse_merged(&ctx, "nan").is_none());
        assert!(parse_merged(&ctx, "Serial No.").is_none());
        assert!(parse_merged(&ctx, "60003 SUKANTA SARKAR\nContact: 9123456780").is_none());
        assert!(parse_merged(&ctx, "60003 D/ Ram").is_none());
    }
}
