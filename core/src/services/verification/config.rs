//! Configuration for the verification service

use chrono::Duration;
use sv_shared::config::verification::{MAX_CODE_TTL_SECONDS, MIN_CODE_TTL_SECONDS};
use sv_shared::AppConfig;

use crate::domain::entities::verification_entry::{DEFAULT_TTL_SECONDS, MAX_ATTEMPTS};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of seconds before a verification code expires
    pub code_ttl_seconds: i64,
    /// Maximum number of verification attempts allowed per code
    pub max_attempts: u32,
    /// Whether the generated code may be returned to the caller in mock mode.
    /// Must be `false` in production.
    pub expose_mock_code: bool,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: DEFAULT_TTL_SECONDS,
            max_attempts: MAX_ATTEMPTS,
            expose_mock_code: false,
        }
    }
}

impl VerificationServiceConfig {
    /// Build from the application configuration
    pub fn from_app_config(config: &AppConfig) -> Self {
        let verification = config.verification.clone().bounded();
        Self {
            code_ttl_seconds: verification.code_ttl_seconds,
            max_attempts: verification.max_attempts,
            expose_mock_code: config.expose_mock_code(),
        }
    }

    /// Code lifetime in seconds, clamped to one second through one day
    pub fn ttl_seconds(&self) -> i64 {
        self.code_ttl_seconds
            .clamp(MIN_CODE_TTL_SECONDS, MAX_CODE_TTL_SECONDS)
    }

    /// Code lifetime as a duration
    pub fn ttl(&self) -> Duration {
        Duration::seconds(self.ttl_seconds())
    }

    /// Checks allowed per code; never less than one
    pub fn attempt_limit(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Code lifetime rounded up to whole minutes, for message templates
    pub fn ttl_minutes(&self) -> i64 {
        (self.ttl_seconds() + 59) / 60
    }
}
