//! Parsing whole documents and writing them back.

use super::fixtures::*;
use crate::rfc::vcard::{ErrorClass, ParseErrorKind, parse, serialize, serialize_all};

#[track_caller]
fn round_trip(input: &str) {
    let document = parse(input).expect("fixture should parse");
    assert!(document.failures.is_empty(), "{:?}", document.failures);

    let serialized = serialize_all(&document.records);
    let reparsed = parse(&serialized).expect("serialized output should parse");

    assert_eq!(document.records, reparsed.records, "\n{serialized}");
}

#[test_log::test]
fn round_trip_basic() {
    round_trip(VCARD_BASIC);
}

#[test_log::test]
fn round_trip_quoted_printable() {
    round_trip(VCARD_21_QP);
}

#[test_log::test]
fn round_trip_folded() {
    round_trip(VCARD_FOLDED);
}

#[test_log::test]
fn round_trip_is_stable() {
    let document = parse(VCARD_FOLDED).expect("fixture should parse");
    let once = serialize(&document.records[0]);
    let twice = serialize(&parse(&once).expect("should parse").records[0]);
    assert_eq!(once, twice);
}

#[test_log::test]
fn decodes_quoted_printable_name() {
    let document = parse(VCARD_21_QP).expect("fixture should parse");
    let record = &document.records[0];

    let name = record.name().expect("valid name").expect("name present");
    assert_eq!(name.family, "Nguyễn");
    assert_eq!(name.given, "Quân");
    assert_eq!(record.version(), Some("2.1"));
    assert_eq!(record.phones().len(), 2);
}

#[test_log::test]
fn decodes_legacy_charset() {
    let document = parse(VCARD_21_LATIN1).expect("fixture should parse");
    let name = document.records[0]
        .name()
        .expect("valid name")
        .expect("name present");
    assert_eq!(name.family, "Müller");
    assert_eq!(name.given, "Jürgen");
}

#[test_log::test]
fn keeps_unknown_and_grouped_lines() {
    let document = parse(VCARD_FOLDED).expect("fixture should parse");
    let record = &document.records[0];

    assert_eq!(record.lines("X-CUSTOM-THING"), ["X-CUSTOM-THING:kept verbatim"]);
    assert_eq!(record.lines("X-ABLABEL"), ["item1.X-ABLabel:Office"]);
    assert!(
        record
            .first_value("NOTE")
            .is_some_and(|note| note.ends_with("across two physical lines."))
    );
}

#[test_log::test]
fn long_lines_are_folded_on_output() {
    let document = parse(VCARD_FOLDED).expect("fixture should parse");
    let output = serialize(&document.records[0]);
    assert!(output.split("\r\n").all(|line| line.len() <= 75));
}

#[test_log::test]
fn bad_block_does_not_hide_the_others() {
    let document = parse(VCARD_STACK_WITH_BAD_BLOCK).expect("document is well delimited");

    assert_eq!(document.block_count(), 3);
    assert_eq!(document.records.len(), 2);
    assert_eq!(document.records[0].formatted_name(), Some("Alice"));
    assert_eq!(document.records[1].formatted_name(), Some("Carol"));

    let failure = &document.failures[0];
    assert_eq!(failure.index, 1);
    assert_eq!(failure.error.kind, ParseErrorKind::UnsupportedCharset);
    assert_eq!(failure.error.class(), ErrorClass::Field);
}

#[test_log::test]
fn invalid_version_is_a_field_error() {
    let document = parse(VCARD_BAD_VERSION).expect("document is well delimited");
    assert!(document.records.is_empty());
    assert_eq!(document.failures[0].error.kind, ParseErrorKind::InvalidVersion);
    assert!(document.failures[0].error.is_field_error());
}

#[test_log::test]
fn unbalanced_markers_fail_the_document() {
    let error = parse(VCARD_UNBALANCED).expect_err("markers do not pair up");
    assert_eq!(error.kind, ParseErrorKind::UnbalancedMarkers);
    assert!(error.is_format_error());
}

#[test_log::test]
fn leading_garbage_fails_the_document() {
    let error = parse(VCARD_LEADING_GARBAGE).expect_err("no BEGIN at start");
    assert_eq!(error.kind, ParseErrorKind::MissingBegin);
}
