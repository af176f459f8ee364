//! Shared setup for the HTTP integration tests

#![allow(dead_code)]

use actix_web::web;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

use sv_api::app::InMemoryVerificationService;
use sv_api::routes::verification::AppState;
use sv_core::services::verification::{
    SmsServiceTrait, VerificationService, VerificationServiceConfig,
};
use sv_core::ManualClock;
use sv_infra::sms::create_mock_sms;
use sv_infra::{InMemoryCodeStore, InMemoryRateLimiter};
use sv_shared::{Environment, RateLimitConfig, ServerConfig, VerificationConfig};

pub type TestState = AppState<InMemoryCodeStore, InMemoryRateLimiter>;

pub const PHONE: &str = "+15551234567";

/// Provider that always fails, forcing the mock fallback
pub struct FailingSms;

#[async_trait]
impl SmsServiceTrait for FailingSms {
    async fn send_verification_code(&self, _: &str, _: &str, _: i64) -> Result<String, String> {
        Err("HTTP 503 Service Unavailable".to_string())
    }

    fn provider_name(&self) -> &str {
        "failing"
    }
}

/// Provider that always succeeds
pub struct AcceptingSms;

#[async_trait]
impl SmsServiceTrait for AcceptingSms {
    async fn send_verification_code(&self, _: &str, _: &str, _: i64) -> Result<String, String> {
        Ok("SM123".to_string())
    }

    fn provider_name(&self) -> &str {
        "accepting"
    }
}

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub store: Arc<InMemoryCodeStore>,
    pub clock: Arc<ManualClock>,
    pub environment: Environment,
    pub server: ServerConfig,
}

impl TestContext {
    pub fn new(environment: Environment) -> Self {
        Self::with_provider(environment, None)
    }

    pub fn with_provider(
        environment: Environment,
        provider: Option<Arc<dyn SmsServiceTrait>>,
    ) -> Self {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        ));

        let mock_sms = create_mock_sms(
            &VerificationConfig {
                mock_delay_ms: 0,
                ..VerificationConfig::default()
            },
            true,
        );

        let store = Arc::new(InMemoryCodeStore::new());
        let service: InMemoryVerificationService = VerificationService::new(
            store.clone(),
            Arc::new(InMemoryRateLimiter::new(RateLimitConfig::default())),
            mock_sms,
            VerificationServiceConfig {
                expose_mock_code: !environment.is_production(),
                ..VerificationServiceConfig::default()
            },
        )
        .with_sms_provider(provider)
        .with_clock(clock.clone());

        Self {
            state: web::Data::new(AppState {
                verification_service: Arc::new(service),
            }),
            store,
            clock,
            environment,
            server: ServerConfig::default(),
        }
    }
}

/// Post a JSON body and return the status with the decoded response body
///
/// An optional `(header, value)` pair is added to the request.
macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri($uri)
            .set_json(&$body)
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        let status = resp.status();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
    ($app:expr, $uri:expr, $body:expr, $header:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri($uri)
            .insert_header($header)
            .set_json(&$body)
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        let status = resp.status();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
}

/// Build the full application for a [`TestContext`]
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(sv_api::app::create_app(
            $ctx.state.clone(),
            $ctx.environment,
            &$ctx.server,
        ))
        .await
    };
}

/// A six digit code guaranteed to differ from `code`
pub fn wrong_code(code: &str) -> String {
    code.chars()
        .map(|c| if c == '9' { '0' } else { char::from(c as u8 + 1) })
        .collect()
}
