//! vCard document parser.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::logical_lines;
use super::values::{parse_name, parse_version};
use crate::rfc::vcard::core::{ContactRecord, names};

pub const BEGIN_MARKER: &str = "BEGIN:VCARD";
pub const END_MARKER: &str = "END:VCARD";

/// One `BEGIN:VCARD` … `END:VCARD` slice of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlock<'a> {
    /// Block text, markers included.
    pub text: &'a str,
    /// 1-based line of the `BEGIN:VCARD` marker in the document.
    pub line: usize,
}

/// A block that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFailure {
    /// 0-based position of the block in the document.
    pub index: usize,
    pub error: ParseError,
}

/// Outcome of parsing a whole document.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub records: Vec<ContactRecord>,
    pub failures: Vec<BlockFailure>,
}

impl ParsedDocument {
    /// Number of blocks found in the document.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// How a logical line is handled by the block scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Marker,
    Version,
    Name,
    FormattedName,
    Telephone,
    Other,
}

fn has_prefix_ignore_case(line: &str, prefix: &str) -> bool {
    line.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn classify(line: &str) -> LineKind {
    // Nested BEGIN/END lines (2.1 AGENT cards) are dropped along with our own markers.
    if has_prefix_ignore_case(line, "BEGIN:") || has_prefix_ignore_case(line, "END:") {
        LineKind::Marker
    } else if line.starts_with("VERSION:") {
        LineKind::Version
    } else if line.starts_with("N:") || line.starts_with("N;") {
        LineKind::Name
    } else if line.starts_with("FN:") {
        LineKind::FormattedName
    } else if line.starts_with("TEL:") || line.starts_with("TEL;") {
        LineKind::Telephone
    } else {
        LineKind::Other
    }
}

/// Splits a document into its vCard blocks.
///
/// ## Summary
/// Leading whitespace is ignored. Blocks are located left to right as
/// non-overlapping `BEGIN:VCARD`/`END:VCARD` pairs; anything after the last
/// `END:VCARD` is ignored.
///
/// ## Errors
/// Returns a format error if the document does not start with
/// `BEGIN:VCARD`, or if the markers do not pair up.
pub fn split_blocks(input: &str) -> ParseResult<Vec<RawBlock<'_>>> {
    let content = input.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let skipped = input.len() - content.len();

    if !content.starts_with(BEGIN_MARKER) {
        return Err(ParseError::new(
            ParseErrorKind::MissingBegin,
            1,
            "no BEGIN:VCARD at start of input",
        ));
    }

    let begins = content.matches(BEGIN_MARKER).count();
    let ends = content.matches(END_MARKER).count();
    if begins != ends {
        return Err(ParseError::new(
            ParseErrorKind::UnbalancedMarkers,
            1,
            format!("{begins} BEGIN:VCARD markers but {ends} END:VCARD markers"),
        ));
    }

    let mut blocks = Vec::with_capacity(begins);
    let mut stop = 0;

    while let Some(found) = content[stop..].find(BEGIN_MARKER) {
        let start = stop + found;
        let line = line_number_at(input, skipped + start);

        let Some(end) = content[start + BEGIN_MARKER.len()..].find(END_MARKER) else {
            return Err(ParseError::new(
                ParseErrorKind::UnbalancedMarkers,
                line,
                "BEGIN:VCARD without a following END:VCARD",
            ));
        };

        stop = start + BEGIN_MARKER.len() + end + END_MARKER.len();
        blocks.push(RawBlock {
            text: &content[start..stop],
            line,
        });
    }

    Ok(blocks)
}

fn line_number_at(input: &str, byte_offset: usize) -> usize {
    input[..byte_offset].matches('\n').count() + 1
}

/// Parses a single block into a record.
///
/// ## Summary
/// `VERSION` and `N` lines are validated, `TEL` lines feed the phone set,
/// and every other property line is kept verbatim.
///
/// ## Errors
/// Returns a field error for an invalid `VERSION` or `N` value.
pub fn parse_block(block: &str, first_line: usize) -> ParseResult<ContactRecord> {
    let mut record = ContactRecord::new();

    for (offset, line) in logical_lines(block) {
        let line_num = first_line + offset;

        match classify(&line) {
            LineKind::Marker => {}
            LineKind::Version => {
                let version = parse_version(&line, line_num)?;
                record.set_lines(names::VERSION, vec![format!("VERSION:{version}")]);
            }
            LineKind::Name => {
                parse_name(&line, line_num)?;
                record.push_line(line);
            }
            LineKind::FormattedName | LineKind::Telephone => {
                record.push_line(line);
            }
            LineKind::Other => {
                if !record.push_line(line) {
                    tracing::warn!(line = line_num, "Skipping line without a property name");
                }
            }
        }
    }

    tracing::trace!(
        line = first_line,
        phones = record.phones().len(),
        "Parsed vCard block"
    );

    Ok(record)
}

/// Parses a vCard document into records.
///
/// ## Summary
/// Every block is parsed independently: a block with a malformed property
/// is reported in [`ParsedDocument::failures`] and the remaining blocks are
/// still returned.
///
/// ## Errors
/// Returns a format error if the document's block delimiters are malformed.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<ParsedDocument> {
    tracing::debug!("Parsing vCard document");

    let blocks = split_blocks(input)?;
    let mut document = ParsedDocument::default();

    for (index, block) in blocks.iter().enumerate() {
        match parse_block(block.text, block.line) {
            Ok(record) => document.records.push(record),
            Err(error) => {
                tracing::warn!(index, error = %error, "Skipping malformed vCard block");
                document.failures.push(BlockFailure { index, error });
            }
        }
    }

    tracing::debug!(
        records = document.records.len(),
        failures = document.failures.len(),
        "Parsed vCard document"
    );

    Ok(document)
}
