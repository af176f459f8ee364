//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::VerificationError;

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to verification flow errors
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl DomainError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Verification(err) => err.code(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
