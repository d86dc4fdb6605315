use thiserror::Error;

/// Application-level errors (CLI layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    CycleError(#[from] siklus_cycle::error::CycleError),

    #[error(transparent)]
    CoreError(#[from] siklus_core::error::CoreError),

    #[error("Failed to encode JSON output: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
