use thiserror::Error;

/// Shell errors - combines all error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    EngineError(#[from] latre_engine::EngineError),

    #[error(transparent)]
    StoreError(#[from] latre_store::StoreError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
