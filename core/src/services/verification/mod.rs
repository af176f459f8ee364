//! Verification service module for SMS-based phone verification
//!
//! This module provides the verification code workflow:
//! - Per-caller issuance rate limiting
//! - Code generation and storage with a TTL
//! - Dispatch through an SMS provider with a mock fallback
//! - Single-use code checking with attempt tracking

mod config;
mod service;
mod traits;
mod types;


pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::{CodeStoreTrait, RateLimiterTrait, SmsServiceTrait};
pub use types::{Delivery, MockReason, SendCodeResult, VerifyCodeResult};
