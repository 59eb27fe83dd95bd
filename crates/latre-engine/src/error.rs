use thiserror::Error;

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Cannot import {location}: {reason}")]
    Source { location: String, reason: String },

    #[error(transparent)]
    Parse(#[from] latre_rfc::rfc::vcard::ParseError),

    #[error(transparent)]
    Store(#[from] latre_store::StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    CoreError(#[from] latre_core::error::CoreError),
}

impl EngineError {
    pub(crate) fn source_error(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Source {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
