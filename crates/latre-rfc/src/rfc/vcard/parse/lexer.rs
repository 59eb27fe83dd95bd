//! Line-level scanning of vCard blocks.
//!
//! Property lines are matched by literal prefix elsewhere; this module only
//! rebuilds logical lines and slices a line into its header and value.

use crate::rfc::vcard::core::VCardParameter;

/// Parameter values that vCard 2.1 allows without a `NAME=` prefix and that
/// announce a transfer encoding rather than a type.
const BARE_ENCODINGS: &[&str] = &["QUOTED-PRINTABLE", "BASE64", "8BIT", "7BIT", "B"];

/// Rebuilds logical lines from a block, with their 0-based physical offset.
///
/// Folded continuations (a physical line starting with a space or tab) are
/// appended to the previous line without the leading whitespace. A
/// quoted-printable line ending in `=` is a soft break and absorbs the next
/// physical line verbatim. Empty lines are dropped.
#[must_use]
pub fn logical_lines(block: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (offset, raw) in block.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        if let Some((_, prev)) = lines.last_mut() {
            if is_quoted_printable(prev) && prev.ends_with('=') {
                prev.pop();
                prev.push_str(line);
                continue;
            }
            if let Some(continuation) = line.strip_prefix([' ', '\t']) {
                prev.push_str(continuation);
                continue;
            }
        }

        if line.trim().is_empty() {
            continue;
        }

        lines.push((offset, line.to_string()));
    }

    lines
}

/// Finds the colon that separates name/params from value.
///
/// Must handle quoted parameter values that may contain colons.
#[must_use]
pub fn find_value_separator(line: &str) -> Option<usize> {
    let mut in_quotes = false;

    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(i),
            _ => {}
        }
    }

    None
}

/// Returns the `[group.]NAME[;params]` part of a line.
#[must_use]
pub fn line_header(line: &str) -> Option<&str> {
    find_value_separator(line).map(|pos| &line[..pos])
}

/// Returns the raw value of a line (everything after the separator).
#[must_use]
pub fn line_value(line: &str) -> &str {
    find_value_separator(line).map_or("", |pos| &line[pos + 1..])
}

/// Extracts the uppercase property name of a line, dropping any group.
///
/// Returns `None` for lines without a value separator or with a name that
/// is not made of ASCII alphanumerics and hyphens.
#[must_use]
pub fn property_name(line: &str) -> Option<String> {
    let header = line_header(line)?;
    let name_with_group = header.split(';').next().unwrap_or(header);
    let (_, name) = split_group(name_with_group);

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }

    Some(name.to_ascii_uppercase())
}

/// Parses the parameters declared in the header of a line.
#[must_use]
pub fn line_params(line: &str) -> Vec<VCardParameter> {
    let Some(header) = line_header(line) else {
        return Vec::new();
    };

    match header.split_once(';') {
        Some((_, params)) => parse_parameters(params),
        None => Vec::new(),
    }
}

/// Returns whether the line declares a quoted-printable value.
#[must_use]
pub fn is_quoted_printable(line: &str) -> bool {
    line_header(line).is_some_and(|header| {
        header
            .split(';')
            .skip(1)
            .any(|param| param.to_ascii_uppercase().ends_with("QUOTED-PRINTABLE"))
    })
}

/// Splits an optional group prefix.
fn split_group(s: &str) -> (Option<&str>, &str) {
    if let Some(dot_pos) = s.find('.') {
        let potential_group = &s[..dot_pos];
        // Group must be alphanumeric + hyphen
        if !potential_group.is_empty()
            && potential_group
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return (Some(potential_group), &s[dot_pos + 1..]);
        }
    }
    (None, s)
}

/// Parses a `;`-separated parameter string.
///
/// Bare vCard 2.1 parameters (`TEL;CELL`, `N;QUOTED-PRINTABLE`) are
/// expanded to `ENCODING=` or `TYPE=` as appropriate.
fn parse_parameters(s: &str) -> Vec<VCardParameter> {
    let mut params = Vec::new();

    for part in split_unquoted(s, ';') {
        if part.is_empty() {
            continue;
        }

        match part.split_once('=') {
            Some((name, values)) => {
                let values = split_unquoted(values, ',')
                    .into_iter()
                    .map(|v| v.trim_matches('"').to_string())
                    .collect();
                params.push(VCardParameter::multi(name, values));
            }
            None if BARE_ENCODINGS.iter().any(|e| part.eq_ignore_ascii_case(e)) => {
                params.push(VCardParameter::new("ENCODING", part));
            }
            None => params.push(VCardParameter::new("TYPE", part)),
        }
    }

    params
}

/// Splits on a delimiter that is not inside double quotes.
fn split_unquoted(s: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == delimiter && !in_quotes {
            parts.push(&s[start..i]);
            start = i + c.len_utf8();
        }
    }

    parts.push(&s[start..]);
    parts
}
