//! vCard parsing.
//!
//! ## Usage
//!
//! ```rust
//! use latre_rfc::rfc::vcard::parse;
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:2.1\r\n\
//! N;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:Nguy=E1=BB=85n;Qu=C3=A2n\r\n\
//! TEL;CELL:0912345678\r\n\
//! END:VCARD\r\n";
//!
//! let document = parse::parse(input).unwrap();
//! let name = document.records[0].name().unwrap().unwrap();
//! assert_eq!(name.family, "Nguyễn");
//! ```
//!
//! ## Features
//!
//! - Splits stacked `BEGIN:VCARD`/`END:VCARD` blocks in document order
//! - Unfolds continuation lines and quoted-printable soft breaks
//! - Decodes quoted-printable `N` values in any declared charset
//! - Keeps unrecognized property lines verbatim
//! - Reports per-block failures without discarding the other blocks

mod error;
pub mod lexer;
mod parser;
pub mod values;


pub use error::{ErrorClass, ParseError, ParseErrorKind, ParseResult};
pub use parser::{
    BEGIN_MARKER, BlockFailure, END_MARKER, ParsedDocument, RawBlock, parse, parse_block,
    split_blocks,
};
