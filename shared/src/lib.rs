//! Shared utilities and common types for the SiteVerify server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (environment, server, verification policy, rate limits, SMS)
//! - Utility functions (phone validation and masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, LoggingConfig, RateLimitConfig, ServerConfig, SmsConfig,
    SmsProvider, VerificationConfig,
};
pub use utils::phone;
