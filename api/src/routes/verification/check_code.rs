use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use sv_core::services::verification::{CodeStoreTrait, RateLimiterTrait};
use sv_shared::phone::mask_phone_number;

use crate::dto::{CheckCodeRequest, CheckCodeResponse};
use crate::handlers::error::{check_error_response, check_validation_response};
use crate::middleware::request_id::RequestIdExt;

use super::AppState;

pub const VERIFIED_MESSAGE: &str = "Phone number verified";

/// Handler for POST /verification/check
///
/// Checks a verification code. A matching code is consumed.
///
/// # Request Body
///
/// ```json
/// { "phone": "+15551234567", "code": "482913" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "Phone number verified", "verified": true }
/// ```
///
/// ## Errors (400)
/// ```json
/// { "message": "Invalid verification code", "verified": false, "attemptsRemaining": 4 }
/// ```
pub async fn check_code<C, R>(
    req: HttpRequest,
    state: web::Data<AppState<C, R>>,
    request: web::Json<CheckCodeRequest>,
) -> HttpResponse
where
    C: CodeStoreTrait + 'static,
    R: RateLimiterTrait + 'static,
{
    let request_id = req
        .get_request_id()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    if let Some(field_errors) = request.field_errors() {
        log::warn!(
            "[{}] Validation failed for check_code request: {:?}",
            request_id,
            field_errors
        );
        return check_validation_response(field_errors);
    }

    let masked = mask_phone_number(&request.phone);
    log::info!("[{}] Processing check_code request for phone: {}", request_id, masked);

    match state
        .verification_service
        .verify_code(&request.phone, &request.code)
        .await
    {
        Ok(_) => {
            log::info!("[{}] Phone verified: {}", request_id, masked);
            HttpResponse::Ok().json(CheckCodeResponse {
                message: VERIFIED_MESSAGE.to_string(),
                verified: true,
                attempts_remaining: None,
                errors: None,
            })
        }
        Err(error) => {
            log::info!("[{}] check_code rejected for phone {}: {}", request_id, masked, error);
            check_error_response(&error)
        }
    }
}
