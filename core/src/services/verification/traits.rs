//! Traits for SMS, code store and rate limiter integration

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{VerificationEntry, VerificationOutcome};

/// Trait for SMS service integration
#[async_trait]
pub trait SmsServiceTrait: Send + Sync {
    /// Send a verification code via SMS, returning the provider message id
    async fn send_verification_code(
        &self,
        phone: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String>;
    /// Name of the provider, reported in debug output
    fn provider_name(&self) -> &str;
}

/// Trait for verification code storage
///
/// Implementations must apply each per-phone read-modify-write atomically.
#[async_trait]
pub trait CodeStoreTrait: Send + Sync {
    /// Store an entry for a phone number, replacing any pending one
    async fn store_code(&self, phone: &str, entry: VerificationEntry) -> Result<(), String>;
    /// Check a code against the pending entry
    ///
    /// Returns `None` when nothing is pending. Otherwise the outcome of
    /// [`VerificationEntry::verify`] has already been applied to the store.
    async fn verify_code(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
        max_attempts: u32,
    ) -> Result<Option<VerificationOutcome>, String>;
    /// Remove entries that expired before `now`, returning how many were removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, String>;
}

/// Trait for issuance rate limiting
#[async_trait]
pub trait RateLimiterTrait: Send + Sync {
    /// Count a request for the caller; `false` means the window is full
    async fn check_rate_limit(&self, client_key: &str, now: DateTime<Utc>) -> Result<bool, String>;
    /// Remove windows that reset before `now`, returning how many were removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, String>;
}
