//! Verification code policy configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Shortest accepted code lifetime in seconds
pub const MIN_CODE_TTL_SECONDS: i64 = 1;

/// Longest accepted code lifetime in seconds (one day)
pub const MAX_CODE_TTL_SECONDS: i64 = 86_400;

/// Most checks a single code may allow
pub const MAX_ATTEMPTS_LIMIT: u32 = 100;

/// Longest simulated delivery delay in milliseconds
pub const MAX_MOCK_DELAY_MS: u64 = 30_000;

/// Policy for issuing and checking verification codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Seconds a code stays valid after issuance
    #[serde(default = "default_code_ttl_seconds")]
    pub code_ttl_seconds: i64,

    /// Checks allowed per issued code
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Simulated delivery delay in mock mode, in milliseconds
    #[serde(default = "default_mock_delay_ms")]
    pub mock_delay_ms: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: default_code_ttl_seconds(),
            max_attempts: default_max_attempts(),
            mock_delay_ms: default_mock_delay_ms(),
        }
    }
}

impl VerificationConfig {
    /// Load from `VERIFICATION_CODE_TTL_SECONDS`, `VERIFICATION_MAX_ATTEMPTS`
    /// and `MOCK_SMS_DELAY_MS`
    ///
    /// Values outside the accepted ranges are clamped into them.
    pub fn from_env() -> Self {
        Self {
            code_ttl_seconds: env_or("VERIFICATION_CODE_TTL_SECONDS", default_code_ttl_seconds()),
            max_attempts: env_or("VERIFICATION_MAX_ATTEMPTS", default_max_attempts()),
            mock_delay_ms: env_or("MOCK_SMS_DELAY_MS", default_mock_delay_ms()),
        }
        .bounded()
    }

    /// Clamp every field into its accepted range
    ///
    /// The TTL is kept between one second and one day and at least one
    /// attempt is always allowed.
    pub fn bounded(self) -> Self {
        Self {
            code_ttl_seconds: self
                .code_ttl_seconds
                .clamp(MIN_CODE_TTL_SECONDS, MAX_CODE_TTL_SECONDS),
            max_attempts: self.max_attempts.clamp(1, MAX_ATTEMPTS_LIMIT),
            mock_delay_ms: self.mock_delay_ms.min(MAX_MOCK_DELAY_MS),
        }
    }
}

fn default_code_ttl_seconds() -> i64 {
    300  // 5 minutes
}

fn default_max_attempts() -> u32 {
    5
}

fn default_mock_delay_ms() -> u64 {
    500
}
