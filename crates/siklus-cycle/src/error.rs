use thiserror::Error;

/// Errors raised by the cycle calculator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CycleError {
    #[error(transparent)]
    CoreError(#[from] siklus_core::error::CoreError),
}

impl CycleError {
    /// ## Summary
    /// Returns `true` if the caller passed a missing or malformed argument.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        match self {
            Self::CoreError(e) => e.is_invalid_input(),
        }
    }
}

pub type CycleResult<T> = std::result::Result<T, CycleError>;
