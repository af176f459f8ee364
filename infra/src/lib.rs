//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the SiteVerify service,
//! following Clean Architecture principles. It provides concrete implementations
//! of the traits defined in `sv_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: In-memory verification code store with TTL sweeping
//! - **Services**: In-memory fixed-window rate limiter
//! - **SMS**: SMS service integrations (Twilio, mock)
//!
//! ## Features
//!
//! - `twilio-sms`: Enable Twilio SMS service (default)

// Re-export core types for convenience
pub use sv_core::errors::*;

/// Cache module - In-memory verification code storage
pub mod cache;

/// Services module - Infrastructure service implementations
pub mod services;

/// SMS service module - External SMS providers
pub mod sms;

pub use cache::InMemoryCodeStore;
pub use services::InMemoryRateLimiter;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Cache error
    #[error("Cache error: {0}")]
    Cache(String),
}
