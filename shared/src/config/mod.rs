//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Deployment mode detection and logging configuration
//! - `rate_limit` - Issuance rate limiting per caller
//! - `server` - HTTP server bind address and CORS origins
//! - `sms` - SMS provider selection and credentials
//! - `verification` - Verification code policy (length, TTL, attempts, mock delay)

pub mod environment;
pub mod rate_limit;
pub mod server;
pub mod sms;
pub mod verification;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

// Re-export commonly used types
pub use environment::{Environment, LoggingConfig};
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;
pub use sms::{SmsConfig, SmsProvider};
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Verification code policy
    pub verification: VerificationConfig,

    /// Issuance rate limiting
    pub rate_limit: RateLimitConfig,

    /// SMS provider configuration
    pub sms: SmsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            verification: VerificationConfig::default(),
            rate_limit: RateLimitConfig::default(),
            sms: SmsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Callers are expected to have loaded any `.env` file beforehand.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            verification: VerificationConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            sms: SmsConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Whether generated codes may be returned to the caller in mock mode
    pub fn expose_mock_code(&self) -> bool {
        !self.environment.is_production()
    }
}

/// Read an environment variable and parse it, falling back to `default`
/// when the variable is unset or does not parse
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read a non-empty environment variable
pub(crate) fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
