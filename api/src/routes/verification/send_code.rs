use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use sv_core::services::verification::{CodeStoreTrait, Delivery, RateLimiterTrait};
use sv_shared::phone::mask_phone_number;

use crate::dto::{to_field_errors, ErrorResponse, MockDebugInfo, SendCodeRequest, SendCodeResponse};
use crate::handlers::error::send_error_response;
use crate::middleware::request_id::RequestIdExt;

use super::{extract_client_key, AppState};

pub const CODE_SENT_MESSAGE: &str = "Verification code sent";

/// Handler for POST /verification/send
///
/// Issues a verification code for the phone number.
///
/// # Request Body
///
/// ```json
/// { "phone": "+15551234567" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "Verification code sent" }
/// ```
///
/// Outside production, when the code went through the mock path:
/// ```json
/// {
///     "message": "Verification code sent",
///     "mockCode": "482913",
///     "debug": { "provider": "mock", "reason": "provider_not_configured", "expiresInSeconds": 300 }
/// }
/// ```
///
/// ## Errors
/// - 400 validation error with field details
/// - 429 rate limit exceeded
/// - 500 internal error
pub async fn send_code<C, R>(
    req: HttpRequest,
    state: web::Data<AppState<C, R>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    C: CodeStoreTrait + 'static,
    R: RateLimiterTrait + 'static,
{
    let request_id = req
        .get_request_id()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    if let Err(validation_errors) = request.validate() {
        let field_errors = to_field_errors(&validation_errors);
        log::warn!(
            "[{}] Validation failed for send_code request: {:?}",
            request_id,
            field_errors
        );
        return HttpResponse::BadRequest().json(ErrorResponse::validation(field_errors));
    }

    let client_key = extract_client_key(&req);

    log::info!(
        "[{}] Processing send_code request for phone: {}, client: {}",
        request_id,
        mask_phone_number(&request.phone),
        client_key
    );

    match state
        .verification_service
        .send_verification_code(&request.phone, &client_key)
        .await
    {
        Ok(result) => {
            let debug = result.mock_code.as_ref().and_then(|_| match &result.delivery {
                Delivery::Mock { provider, reason, .. } => Some(MockDebugInfo {
                    provider: provider.clone(),
                    reason: reason.as_str().to_string(),
                    expires_in_seconds: result.expires_in_seconds,
                }),
                Delivery::Sent { .. } => None,
            });

            log::info!(
                "[{}] Verification code issued via {} for phone: {}",
                request_id,
                result.delivery.provider(),
                mask_phone_number(&request.phone)
            );

            HttpResponse::Ok().json(SendCodeResponse {
                message: CODE_SENT_MESSAGE.to_string(),
                mock_code: result.mock_code,
                debug,
            })
        }
        Err(error) => {
            log::warn!(
                "[{}] send_code failed for phone {}: {}",
                request_id,
                mask_phone_number(&request.phone),
                error
            );
            send_error_response(&error)
        }
    }
}
