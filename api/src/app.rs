//! Application state and factory
//!
//! This module wires the verification service from configuration and
//! provides the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use sv_core::services::verification::{
    CodeStoreTrait, RateLimiterTrait, VerificationService, VerificationServiceConfig,
};
use sv_infra::sms::{create_mock_sms, create_sms_provider};
use sv_infra::{InMemoryCodeStore, InMemoryRateLimiter};
use sv_shared::{AppConfig, Environment, ServerConfig};

use crate::dto::ErrorResponse;
use crate::middleware::{cors::create_cors, request_id::RequestIdMiddleware};
use crate::routes::verification::{self, AppState};

pub const SERVICE_NAME: &str = "siteverify-api";

/// Verification service backed by the in-memory stores
pub type InMemoryVerificationService = VerificationService<InMemoryCodeStore, InMemoryRateLimiter>;

/// Build the verification service described by the configuration
///
/// The real SMS provider is attached only when it is fully configured.
pub fn build_verification_service(config: &AppConfig) -> InMemoryVerificationService {
    let code_store = Arc::new(InMemoryCodeStore::new());
    let rate_limiter = Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone()));
    let mock_sms = create_mock_sms(&config.verification, config.expose_mock_code());

    VerificationService::new(
        code_store,
        rate_limiter,
        mock_sms,
        VerificationServiceConfig::from_app_config(config),
    )
    .with_sms_provider(create_sms_provider(&config.sms))
}

/// Create and configure the application with all dependencies
pub fn create_app<C, R>(
    app_state: web::Data<AppState<C, R>>,
    environment: Environment,
    server: &ServerConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    C: CodeStoreTrait + 'static,
    R: RateLimiterTrait + 'static,
{
    let cors = create_cors(environment, server);

    App::new()
        .app_data(app_state)
        // Registration order is inside-out: the request id is attached first
        .wrap(Logger::new(r#"%a "%r" %s %b %T %{x-request-id}o"#))
        .wrap(cors)
        .wrap(RequestIdMiddleware)
        .route("/", web::get().to(api_index))
        .route("/health", web::get().to(health_check))
        .configure(verification::configure::<C, R>)
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Endpoint index
async fn api_index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "SiteVerify API",
        "endpoints": {
            "health": {
                "path": "/health",
                "method": "GET"
            },
            "send_code": {
                "path": "/verification/send",
                "method": "POST",
                "description": "Send a verification code via SMS",
                "request_body": {
                    "phone": "string (5-20 chars)"
                },
                "responses": {
                    "200": "Code issued; outside production mock mode also returns mockCode and debug",
                    "400": "Validation error",
                    "429": "Rate limit exceeded",
                    "500": "Internal error"
                }
            },
            "check_code": {
                "path": "/verification/check",
                "method": "POST",
                "description": "Check a verification code",
                "request_body": {
                    "phone": "string (5-20 chars)",
                    "code": "string (exactly 6 digits)"
                },
                "responses": {
                    "200": "Phone number verified",
                    "400": "Validation error, no pending code, expired code, too many attempts or invalid code",
                    "500": "Internal error"
                }
            }
        }
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Not Found"))
}
