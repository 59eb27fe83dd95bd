//! Value decoding for the properties the codec interprets.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{line_params, line_value};
use crate::rfc::vcard::core::{PersonName, param_value};

const VERSION_PREFIX: &str = "VERSION:";

/// Unescapes a text value per RFC 6350 §3.4.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('n' | 'N') => {
                    chars.next();
                    result.push('\n');
                }
                Some(',') => {
                    chars.next();
                    result.push(',');
                }
                Some(';') => {
                    chars.next();
                    result.push(';');
                }
                Some('\\') => {
                    chars.next();
                    result.push('\\');
                }
                _ => result.push(c),
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Splits a structured value on unescaped semicolons.
#[must_use]
pub fn split_structured(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut prev_backslash = false;

    for (i, c) in s.char_indices() {
        if c == '\\' && !prev_backslash {
            prev_backslash = true;
            continue;
        }

        if c == ';' && !prev_backslash {
            parts.push(&s[start..i]);
            start = i + 1;
        }

        prev_backslash = false;
    }

    parts.push(&s[start..]);
    parts
}

/// Returns whether a string is an acceptable `VERSION` value.
///
/// Only digits and dots are allowed, with at least one digit.
#[must_use]
pub fn is_version_number(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit()) && s.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Parses a `VERSION:` line and returns the version string.
///
/// ## Errors
/// Returns a field error if the value contains anything but digits and dots.
pub fn parse_version(line: &str, line_num: usize) -> ParseResult<String> {
    let version = line
        .strip_prefix(VERSION_PREFIX)
        .unwrap_or_else(|| line_value(line))
        .trim();

    if is_version_number(version) {
        Ok(version.to_string())
    } else {
        Err(ParseError::new(
            ParseErrorKind::InvalidVersion,
            line_num,
            format!("illegal character in VERSION field: {version:?}"),
        ))
    }
}

/// Parses an `N:` or `N;…:` line into family and given name.
///
/// A parameter block announcing `ENCODING=QUOTED-PRINTABLE` makes the value
/// quoted-printable decoded, then decoded with the declared `CHARSET`
/// (UTF-8 when none is declared).
///
/// ## Errors
/// Returns a field error if the line has no value, declares an unsupported
/// encoding or charset, or the value has no family/given split.
pub fn parse_name(line: &str, line_num: usize) -> ParseResult<PersonName> {
    if super::lexer::find_value_separator(line).is_none() {
        return Err(ParseError::invalid_name(
            line_num,
            "N field: cannot get the main string",
        ));
    }

    let raw = line_value(line).trim_end();
    let params = line_params(line);
    let encoding = param_value(&params, "ENCODING");

    let decoded = match encoding {
        None => raw.to_string(),
        Some(enc) if enc.eq_ignore_ascii_case("QUOTED-PRINTABLE") => {
            let bytes = decode_quoted_printable(raw);
            let charset = param_value(&params, "CHARSET").unwrap_or("UTF-8");
            decode_charset(&bytes, charset, line_num)?
        }
        Some(other) => return Err(ParseError::unsupported_encoding(line_num, other)),
    };

    split_name(&decoded, line_num)
}

/// Splits a decoded `N` value into family and given name.
///
/// Trailing empty components are ignored; additional, prefix and suffix
/// components are tolerated but not kept.
fn split_name(value: &str, line_num: usize) -> ParseResult<PersonName> {
    let trimmed = value.trim_end_matches(';');
    let parts = split_structured(trimmed);

    match parts.as_slice() {
        [family, given, ..] => Ok(PersonName {
            family: unescape_text(family),
            given: unescape_text(given),
        }),
        _ => Err(ParseError::invalid_name(
            line_num,
            format!("N field: cannot split {trimmed:?} into family and given name"),
        )),
    }
}

/// Decodes a quoted-printable string into raw bytes.
///
/// Invalid escapes are kept literally, the way lenient decoders do.
#[must_use]
pub fn decode_quoted_printable(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b != b'=' {
            out.push(b);
            i += 1;
            continue;
        }

        match (bytes.get(i + 1), bytes.get(i + 2)) {
            // Soft line breaks
            (Some(b'\r'), Some(b'\n')) => i += 3,
            (Some(b'\n'), _) => i += 2,
            (Some(&hi), Some(&lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                out.push((hex_value(hi) << 4) | hex_value(lo));
                i += 3;
            }
            (None, _) => i += 1,
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }

    out
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

/// Decodes bytes using a character set label (`UTF-8`, `ISO-8859-1`, …).
///
/// ## Errors
/// Returns a field error for unknown labels or bytes that are not valid in
/// the declared character set.
pub fn decode_charset(bytes: &[u8], label: &str, line_num: usize) -> ParseResult<String> {
    let encoding = encoding_rs::Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::UnsupportedCharset,
            line_num,
            format!("{label} charset is not supported"),
        )
    })?;

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(std::borrow::Cow::into_owned)
        .ok_or_else(|| {
            ParseError::invalid_name(line_num, format!("N field: value is not valid {label}"))
        })
}

/// Extracts the bare phone number of a `TEL` line.
///
/// Type parameters are ignored and a `tel:` URI scheme is stripped.
#[must_use]
pub fn phone_number(line: &str) -> Option<String> {
    let value = line_value(line).trim();
    let value = value
        .strip_prefix("tel:")
        .or_else(|| value.strip_prefix("TEL:"))
        .unwrap_or(value)
        .trim();

    (!value.is_empty()).then(|| value.to_string())
}

/// Parses a `REV` timestamp.
///
/// Accepts extended and basic ISO 8601 forms, with or without a zone
/// designator, and date-only values (taken as midnight UTC). A timestamp
/// without a zone is taken as UTC.
#[must_use]
pub fn parse_revision(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y%m%dT%H%M%S%z") {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = value.strip_suffix('Z').unwrap_or(value);
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y%m%dT%H%M%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt.and_utc());
        }
    }

    for format in ["%Y-%m-%d", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(naive, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}
