//! SMS Service Module
//!
//! This module provides SMS service implementations for sending verification
//! codes. It includes a Twilio provider and a mock implementation used in
//! development and as the fallback when no provider is usable.

use std::sync::Arc;
use std::time::Duration;

use sv_core::services::verification::SmsServiceTrait;
use sv_shared::{SmsConfig, SmsProvider, VerificationConfig};

pub mod adapter;
pub mod mock_sms;
pub mod sms_service;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

// Re-export commonly used types
pub use adapter::SmsServiceAdapter;
pub use mock_sms::MockSmsService;
pub use sms_service::{verification_message, SmsService};

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

/// Create the real SMS provider described by the configuration
///
/// Returns `None` when the mock provider is selected, when credentials are
/// incomplete, or when the provider cannot be initialised. The caller then
/// issues codes in mock mode.
pub fn create_sms_provider(config: &SmsConfig) -> Option<Arc<dyn SmsServiceTrait>> {
    match config.provider {
        SmsProvider::Mock => {
            tracing::info!("SMS provider set to mock, codes will not be sent");
            None
        }
        SmsProvider::Twilio if !config.is_configured() => {
            tracing::warn!("Twilio selected but credentials are incomplete, using mock mode");
            None
        }
        SmsProvider::Twilio => create_twilio_provider(config),
    }
}

#[cfg(feature = "twilio-sms")]
fn create_twilio_provider(config: &SmsConfig) -> Option<Arc<dyn SmsServiceTrait>> {
    match TwilioSmsService::from_sms_config(config) {
        Ok(service) => Some(Arc::new(SmsServiceAdapter::new(service))),
        Err(e) => {
            tracing::error!("Failed to initialize Twilio SMS service: {}", e);
            tracing::warn!("Falling back to mock SMS service");
            None
        }
    }
}

#[cfg(not(feature = "twilio-sms"))]
fn create_twilio_provider(_config: &SmsConfig) -> Option<Arc<dyn SmsServiceTrait>> {
    tracing::warn!("Twilio selected but the twilio-sms feature is disabled, using mock mode");
    None
}

/// Create the mock SMS service used for the fallback path
///
/// `log_content` controls whether the message body, code included, reaches
/// the log. Pass `false` wherever codes are withheld from callers.
pub fn create_mock_sms(config: &VerificationConfig, log_content: bool) -> Arc<dyn SmsServiceTrait> {
    Arc::new(SmsServiceAdapter::new(
        MockSmsService::with_delay(Duration::from_millis(config.mock_delay_ms))
            .with_content_logging(log_content),
    ))
}
