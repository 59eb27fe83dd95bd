use std::path::PathBuf;

use thiserror::Error;

use latre_rfc::rfc::vcard::ParseError;

/// Store layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Contact not found: {0}")]
    NotFound(String),

    #[error("Contact already exists: {0}")]
    Conflict(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unreadable contact file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    CoreError(#[from] latre_core::error::CoreError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
