//! Phone verification route handlers
//!
//! - `POST /verification/send` issues a code
//! - `POST /verification/check` checks a code

pub mod check_code;
pub mod send_code;

use actix_web::{web, HttpRequest};
use std::sync::Arc;

use sv_core::services::verification::{CodeStoreTrait, RateLimiterTrait, VerificationService};

use crate::handlers::error::{check_json_error, send_json_error};

pub use check_code::check_code;
pub use send_code::send_code;

/// Caller bucket used when no forwarding header is present
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Application state that holds shared services
pub struct AppState<C, R>
where
    C: CodeStoreTrait,
    R: RateLimiterTrait,
{
    pub verification_service: Arc<VerificationService<C, R>>,
}

/// Register the verification routes under `/verification`
pub fn configure<C, R>(cfg: &mut web::ServiceConfig)
where
    C: CodeStoreTrait + 'static,
    R: RateLimiterTrait + 'static,
{
    cfg.service(
        web::scope("/verification")
            .service(
                web::resource("/send")
                    .app_data(web::JsonConfig::default().error_handler(send_json_error))
                    .route(web::post().to(send_code::<C, R>)),
            )
            .service(
                web::resource("/check")
                    .app_data(web::JsonConfig::default().error_handler(check_json_error))
                    .route(web::post().to(check_code::<C, R>)),
            ),
    );
}

/// Identify the caller for rate limiting
///
/// Uses the first `X-Forwarded-For` entry, then `X-Real-IP`, and falls back
/// to a shared `"unknown"` bucket.
pub fn extract_client_key(req: &HttpRequest) -> String {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| header("x-real-ip"))
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}
