//! vCard codec (vCard 2.1 / 3.0, with 4.0 tolerated).
//!
//! This module parses stacked vCard text into [`ContactRecord`]s and
//! serializes records back to self-contained vCard text.
//!
//! ## Overview
//!
//! A vCard file holds one or more `BEGIN:VCARD` … `END:VCARD` blocks. Each
//! block becomes a record that keeps every property line verbatim, so that
//! nothing is lost when a record is merged and written back. Only the
//! properties that identify a contact are interpreted: `VERSION`, `N`
//! (including quoted-printable encoded names), `FN`, `TEL` and `REV`.
//!
//! ## Usage
//!
//! ### Parsing
//!
//! ```rust
//! use latre_rfc::rfc::vcard::parse;
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:3.0\r\n\
//! N:Doe;John;;;\r\n\
//! FN:John Doe\r\n\
//! TEL;TYPE=CELL:555-0100\r\n\
//! END:VCARD\r\n";
//!
//! let document = parse(input).unwrap();
//! let card = &document.records[0];
//! assert_eq!(card.formatted_name(), Some("John Doe"));
//! assert!(card.phones().contains("555-0100"));
//! ```
//!
//! ### Serializing
//!
//! ```rust
//! use latre_rfc::rfc::vcard::{ContactRecord, serialize};
//!
//! let mut card = ContactRecord::new();
//! card.push_line("FN:Jane Doe");
//! card.push_line("TEL:555-0199");
//!
//! let output = serialize(&card);
//! assert!(output.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\n"));
//! assert!(output.contains("TEL:555-0199"));
//! ```
//!
//! ## Submodules
//!
//! - [`core`] - `ContactRecord`, property names and the field lookup table
//! - [`parse`] - block splitting, line scanning and value decoding
//! - [`build`] - serialization, line folding and photo embedding

pub mod build;
pub mod core;
pub mod parse;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use build::{content_lines, serialize, serialize_all};
pub use core::{ContactField, ContactRecord, PersonName, VCardParameter};
pub use parse::{
    BlockFailure, ErrorClass, ParseError, ParseErrorKind, ParseResult, ParsedDocument, parse,
    parse_block, split_blocks,
};
