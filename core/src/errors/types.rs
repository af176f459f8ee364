//! Error types for the phone verification flow
//!
//! The `Display` text of each variant is the message returned to API callers.

use thiserror::Error;

/// Verification flow errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Rate limit exceeded. Try again later.")]
    RateLimitExceeded,

    #[error("No pending verification for this phone number")]
    NoPendingVerification,

    #[error("Verification code expired")]
    CodeExpired,

    #[error("Too many attempts. Please request a new code.")]
    MaxAttemptsExceeded,

    #[error("Invalid verification code")]
    InvalidCode { attempts_remaining: u32 },
}

impl VerificationError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            VerificationError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            VerificationError::NoPendingVerification => "NO_PENDING_VERIFICATION",
            VerificationError::CodeExpired => "CODE_EXPIRED",
            VerificationError::MaxAttemptsExceeded => "MAX_ATTEMPTS_EXCEEDED",
            VerificationError::InvalidCode { .. } => "INVALID_CODE",
        }
    }

    /// Attempts left on the pending entry, when the error carries them
    pub fn attempts_remaining(&self) -> Option<u32> {
        match self {
            VerificationError::InvalidCode { attempts_remaining } => Some(*attempts_remaining),
            _ => None,
        }
    }
}
