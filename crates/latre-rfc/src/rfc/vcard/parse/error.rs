//! vCard parse error types.

use std::fmt;

/// Result type for vCard parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred during vCard parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Line number where the error occurred (1-based).
    pub line: usize,
    /// Additional context or message.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    /// Creates an invalid `N` value error.
    #[must_use]
    pub fn invalid_name(line: usize, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::InvalidName, line, message)
    }

    /// Creates an unsupported encoding error.
    #[must_use]
    pub fn unsupported_encoding(line: usize, encoding: &str) -> Self {
        Self::new(
            ParseErrorKind::UnsupportedEncoding,
            line,
            format!("{encoding} encoding is not supported"),
        )
    }

    /// Returns whether the error concerns block delimiters or a property value.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    /// Returns whether this is a malformed-delimiter error.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        self.class() == ErrorClass::Format
    }

    /// Returns whether this is a malformed-property error.
    #[must_use]
    pub fn is_field_error(&self) -> bool {
        self.class() == ErrorClass::Field
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}: {}: {}",
            self.class(),
            self.line,
            self.kind,
            self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Coarse classification of parse errors.
///
/// A format error rejects a whole document; a field error rejects only the
/// block that carries the offending property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed `BEGIN:VCARD`/`END:VCARD` delimiters.
    Format,
    /// Malformed or unsupported property value.
    Field,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format => write!(f, "format error"),
            Self::Field => write!(f, "field error"),
        }
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input does not start with `BEGIN:VCARD`.
    MissingBegin,
    /// `BEGIN:VCARD` and `END:VCARD` markers do not pair up.
    UnbalancedMarkers,
    /// `VERSION` value is not made of digits and dots.
    InvalidVersion,
    /// `N` value cannot be split into family and given name.
    InvalidName,
    /// Parameter block declares an encoding other than quoted-printable.
    UnsupportedEncoding,
    /// Parameter block declares an unknown character set.
    UnsupportedCharset,
}

impl ParseErrorKind {
    /// Returns the class this kind belongs to.
    #[must_use]
    pub const fn class(self) -> ErrorClass {
        match self {
            Self::MissingBegin | Self::UnbalancedMarkers => ErrorClass::Format,
            Self::InvalidVersion
            | Self::InvalidName
            | Self::UnsupportedEncoding
            | Self::UnsupportedCharset => ErrorClass::Field,
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBegin => write!(f, "missing BEGIN:VCARD"),
            Self::UnbalancedMarkers => write!(f, "unbalanced BEGIN/END markers"),
            Self::InvalidVersion => write!(f, "invalid version"),
            Self::InvalidName => write!(f, "invalid name"),
            Self::UnsupportedEncoding => write!(f, "unsupported encoding"),
            Self::UnsupportedCharset => write!(f, "unsupported charset"),
        }
    }
}
