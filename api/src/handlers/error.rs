//! Mapping of domain errors to HTTP responses
//!
//! Every error leaving the verification endpoints goes through one of the two
//! functions here, so the response shapes stay in one place.

use actix_web::{error::InternalError, error::JsonPayloadError, HttpRequest, HttpResponse};

use sv_core::errors::{DomainError, VerificationError};

use crate::dto::{
    CheckCodeResponse, ErrorResponse, FieldErrors, INTERNAL_ERROR_MESSAGE,
    VALIDATION_ERROR_MESSAGE,
};

/// Field a core validation message refers to
///
/// Core validation messages start with the field name.
fn validation_field(message: &str) -> &'static str {
    match message.split_whitespace().next() {
        Some("phone") => "phone",
        Some("code") => "code",
        _ => "request",
    }
}

fn single_field_error(message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(validation_field(message).to_string(), vec![message.to_string()]);
    errors
}

/// Response for a failed `POST /verification/send`
pub fn send_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::validation(single_field_error(message)))
        }
        DomainError::Verification(VerificationError::RateLimitExceeded) => {
            HttpResponse::TooManyRequests().json(ErrorResponse::new(
                VerificationError::RateLimitExceeded.to_string(),
            ))
        }
        DomainError::Verification(err) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()))
        }
        DomainError::Internal { .. } => {
            HttpResponse::InternalServerError().json(ErrorResponse::new(INTERNAL_ERROR_MESSAGE))
        }
    }
}

/// Response for a failed `POST /verification/check`
pub fn check_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Validation { message } => {
            check_validation_response(single_field_error(message))
        }
        DomainError::Verification(err @ VerificationError::RateLimitExceeded) => {
            HttpResponse::TooManyRequests().json(CheckCodeResponse {
                message: err.to_string(),
                verified: false,
                attempts_remaining: None,
                errors: None,
            })
        }
        DomainError::Verification(err) => HttpResponse::BadRequest().json(CheckCodeResponse {
            message: err.to_string(),
            verified: false,
            attempts_remaining: err.attempts_remaining(),
            errors: None,
        }),
        DomainError::Internal { .. } => {
            HttpResponse::InternalServerError().json(CheckCodeResponse {
                message: INTERNAL_ERROR_MESSAGE.to_string(),
                verified: false,
                attempts_remaining: None,
                errors: None,
            })
        }
    }
}

/// 400 response for `POST /verification/check` with field errors
pub fn check_validation_response(errors: FieldErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(CheckCodeResponse {
        message: VALIDATION_ERROR_MESSAGE.to_string(),
        verified: false,
        attempts_remaining: None,
        errors: Some(errors),
    })
}

fn body_errors(err: &JsonPayloadError) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert("body".to_string(), vec![err.to_string()]);
    errors
}

/// Turns malformed JSON on the send endpoint into the validation shape
pub fn send_json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected malformed body on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ErrorResponse::validation(body_errors(&err)));
    InternalError::from_response(err, response).into()
}

/// Turns malformed JSON on the check endpoint into the validation shape
pub fn check_json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected malformed body on {}: {}", req.path(), err);
    let response = check_validation_response(body_errors(&err));
    InternalError::from_response(err, response).into()
}
