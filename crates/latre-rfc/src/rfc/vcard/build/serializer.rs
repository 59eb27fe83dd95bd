//! vCard serialization.

use super::fold::{fold_line, fold_quoted_printable};
use crate::rfc::vcard::core::{ContactRecord, names};
use crate::rfc::vcard::parse::lexer::is_quoted_printable;
use crate::rfc::vcard::parse::{BEGIN_MARKER, END_MARKER};

/// Version written for records that carry none.
pub const DEFAULT_VERSION: &str = "3.0";

/// Serializes a single record to vCard text.
///
/// ## Summary
/// Emits `BEGIN:VCARD`, the `VERSION` line, every property line in
/// canonical order and `END:VCARD`, with CRLF line endings and lines
/// folded at 75 octets.
#[must_use]
pub fn serialize(record: &ContactRecord) -> String {
    let mut output = String::new();
    serialize_record(record, &mut output);
    output
}

/// Serializes several records into one document.
///
/// Records are separated by a blank line, in the order given.
#[must_use]
pub fn serialize_all(records: &[ContactRecord]) -> String {
    records
        .iter()
        .map(serialize)
        .collect::<Vec<_>>()
        .join("\r\n")
}

/// Returns the unfolded property lines of a record in canonical order,
/// `VERSION` first, without the `BEGIN`/`END` markers.
///
/// Two records with the same content lines serialize identically.
#[must_use]
pub fn content_lines(record: &ContactRecord) -> Vec<String> {
    let version = record.version().unwrap_or(DEFAULT_VERSION);
    let mut lines = vec![format!("VERSION:{version}")];

    for name in canonical_property_order(record) {
        lines.extend(record.lines(name).iter().cloned());
    }

    lines
}

fn serialize_record(record: &ContactRecord, output: &mut String) {
    output.push_str(BEGIN_MARKER);
    output.push_str("\r\n");

    for line in content_lines(record) {
        let folded = if is_quoted_printable(&line) {
            fold_quoted_printable(&line)
        } else {
            fold_line(&line)
        };
        output.push_str(&folded);
        output.push_str("\r\n");
    }

    output.push_str(END_MARKER);
    output.push_str("\r\n");
}

/// Returns property names in canonical order for deterministic output.
fn canonical_property_order(record: &ContactRecord) -> Vec<&str> {
    let mut ordered: Vec<&str> = record
        .property_names()
        .filter(|name| *name != names::VERSION)
        .collect();

    // Names come sorted from the record; the stable sort keeps that order
    // between properties of equal priority.
    ordered.sort_by_key(|name| property_priority(name));
    ordered
}

/// Returns priority for property ordering (lower = earlier).
fn property_priority(name: &str) -> u8 {
    match name {
        "FN" => 1,
        "N" => 2,
        "KIND" => 3,
        "NICKNAME" => 4,
        "PHOTO" => 10,
        "BDAY" => 11,
        "ANNIVERSARY" => 12,
        "GENDER" => 13,
        "ADR" => 20,
        "LABEL" => 21,
        "TEL" => 30,
        "EMAIL" => 31,
        "IMPP" => 32,
        "MAILER" => 33,
        "LANG" => 34,
        "TZ" => 40,
        "GEO" => 41,
        "TITLE" => 50,
        "ROLE" => 51,
        "LOGO" => 52,
        "AGENT" => 53,
        "ORG" => 54,
        "MEMBER" => 55,
        "RELATED" => 56,
        "CATEGORIES" => 60,
        "NOTE" => 61,
        "PRODID" => 70,
        "REV" => 71,
        "SORT-STRING" => 72,
        "SOUND" => 73,
        "UID" => 74,
        "URL" => 75,
        "CLASS" => 76,
        "KEY" => 80,
        "FBURL" => 90,
        "CALADRURI" => 91,
        "CALURI" => 92,
        _ => 100, // Extension properties
    }
}
