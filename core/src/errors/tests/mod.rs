//! Unit tests for domain error types

use crate::errors::{DomainError, VerificationError};

#[test]
fn test_verification_error_messages() {
    assert_eq!(
        VerificationError::RateLimitExceeded.to_string(),
        "Rate limit exceeded. Try again later."
    );
    assert_eq!(
        VerificationError::InvalidCode { attempts_remaining: 2 }.to_string(),
        "Invalid verification code"
    );
}

#[test]
fn test_attempts_remaining_only_on_invalid_code() {
    assert_eq!(
        VerificationError::InvalidCode { attempts_remaining: 0 }.attempts_remaining(),
        Some(0)
    );
    assert_eq!(VerificationError::CodeExpired.attempts_remaining(), None);
    assert_eq!(VerificationError::NoPendingVerification.attempts_remaining(), None);
}

#[test]
fn test_domain_error_bridges_verification_error() {
    let error: DomainError = VerificationError::MaxAttemptsExceeded.into();

    assert_eq!(error.code(), "MAX_ATTEMPTS_EXCEEDED");
    assert_eq!(error.to_string(), "Too many attempts. Please request a new code.");
}

#[test]
fn test_domain_error_codes() {
    let validation = DomainError::Validation { message: "phone: too short".to_string() };
    let internal = DomainError::Internal { message: "store unavailable".to_string() };

    assert_eq!(validation.code(), "VALIDATION_ERROR");
    assert_eq!(internal.code(), "INTERNAL_ERROR");
    assert!(internal.to_string().contains("store unavailable"));
}
