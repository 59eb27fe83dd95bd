use thiserror::Error;

use crate::rfc::vcard::parse::ParseError;

/// RFC parsing and validation errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    CoreError(#[from] latre_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
