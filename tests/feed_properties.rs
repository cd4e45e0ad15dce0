//! Properties of feed parsing: counts, field mapping and rejection of bad input.

use cbr_rates_core::{parse_feed, RateError, RateErrorKind};
use cbr_rates_tests::{feed_xml, Entry};

const ENTRIES: [Entry; 5] = [
    Entry::new("Австралийский доллар", "1", "AUD", "52,8012"),
    Entry::new("Армянских драмов", "100", "AMD", "20,6789"),
    Entry::new("Белорусский рубль", "1", "BYN", "24,1102"),
    Entry::new("Вьетнамских донгов", "10000", "VND", "30,7410"),
    Entry::new("Евро", "1", "EUR", "95.5"),
];

#[test]
fn every_prefix_of_a_valid_feed_yields_that_many_records() {
    for count in 0..=ENTRIES.len() {
        let snapshot = parse_feed(&feed_xml("16.10.2026", &ENTRIES[..count]))
            .expect("valid feed should parse");

        assert_eq!(snapshot.len(), count);
        for (record, entry) in snapshot.records().iter().zip(&ENTRIES[..count]) {
            assert_eq!(record.code, entry.code);
            assert_eq!(record.display_name, entry.name);
            assert_eq!(record.face_value, entry.nominal);
            assert_eq!(record.rate_value, entry.value.replace(',', ".").parse::<f64>().unwrap());
        }
    }
}

#[test]
fn listed_codes_are_unique() {
    let snapshot = parse_feed(&feed_xml("16.10.2026", &ENTRIES)).expect("valid feed");
    let mut codes: Vec<_> = snapshot.currencies().into_iter().map(|(code, _)| code).collect();
    let before = codes.len();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), before);
}

#[test]
fn each_missing_field_rejects_the_whole_document() {
    let fields = ["Name", "Nominal", "CharCode", "Value"];
    let full = feed_xml("16.10.2026", &ENTRIES[..2]);

    for field in fields {
        // Drop the field from the second entry only.
        let open = format!("<{field}>");
        let close = format!("</{field}>");
        let second_open = full.rfind(&open).expect("field present");
        let second_close = full[second_open..].find(&close).expect("closing tag") + second_open;
        let broken = format!(
            "{}{}",
            &full[..second_open],
            &full[second_close + close.len()..]
        );

        let error = parse_feed(&broken).expect_err("missing field must fail");
        assert_eq!(error.kind(), RateErrorKind::MalformedDocument, "field {field}");
        assert!(error.to_string().contains(field), "field {field}: {error}");
    }
}

#[test]
fn non_numeric_rate_rejects_the_document() {
    let xml = feed_xml("16.10.2026", &[Entry::new("Евро", "1", "EUR", "девяносто")]);
    assert!(matches!(parse_feed(&xml), Err(RateError::MalformedDocument(_))));
}

#[test]
fn duplicate_codes_reject_the_document() {
    let xml = feed_xml(
        "16.10.2026",
        &[
            Entry::new("Евро", "1", "EUR", "95,5"),
            Entry::new("Евро", "1", "EUR", "95,6"),
        ],
    );
    assert!(matches!(parse_feed(&xml), Err(RateError::MalformedDocument(_))));
}

#[test]
fn truncated_document_is_malformed() {
    let full = feed_xml("16.10.2026", &ENTRIES);
    let cut = full.rfind("<Value>").expect("value tag") + 3;
    let truncated = &full[..cut];
    assert!(matches!(parse_feed(truncated), Err(RateError::MalformedDocument(_))));
}
