//! Verification entry entity for SMS-based phone verification.
//!
//! An entry has no explicit status field. Its state is inferred from
//! presence in the store plus the expiry timestamp and attempt counter:
//!
//! ```text
//! absent -> pending -> { consumed | expired | exhausted }
//! ```
//!
//! Every terminal state is reached by removing the entry from the store.
//! [`VerificationEntry::verify`] computes the transition; the store applies it.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Maximum number of checks allowed per issued code
pub const MAX_ATTEMPTS: u32 = 5;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of a verification code (5 minutes)
pub const DEFAULT_TTL_SECONDS: i64 = 300;

/// Pending verification for one phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationEntry {
    /// The numeric one-time code
    pub code: String,

    /// The entry is invalid once the current time is past this instant
    pub expires_at: DateTime<Utc>,

    /// Number of checks made against this entry
    pub attempts: u32,
}

/// Result of checking a submitted code against an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Code matched; the entry is consumed
    Verified,
    /// Code did not match
    Mismatch { attempts_remaining: u32 },
    /// The TTL elapsed before this check
    Expired,
    /// No checks were left before this one
    AttemptsExhausted,
}

impl VerificationOutcome {
    /// Whether the entry must be removed from the store after this outcome
    ///
    /// A mismatch that uses up the last attempt also removes the entry, so the
    /// next check sees no pending verification.
    pub fn discards_entry(&self) -> bool {
        match self {
            VerificationOutcome::Mismatch { attempts_remaining } => *attempts_remaining == 0,
            _ => true,
        }
    }
}

impl VerificationEntry {
    /// Creates an entry for a known code
    ///
    /// An expiry past the representable range saturates at the latest
    /// representable instant.
    pub fn new(code: impl Into<String>, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            code: code.into(),
            expires_at: issued_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            attempts: 0,
        }
    }

    /// Creates an entry with a freshly generated code
    pub fn generate(issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self::new(Self::generate_code(), issued_at, ttl)
    }

    /// Generates a fixed-length numeric code
    ///
    /// Each digit is drawn independently and uniformly from 0-9.
    pub fn generate_code() -> String {
        let mut rng = OsRng;
        (0..CODE_LENGTH)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    /// Checks whether a string has the shape of a verification code
    pub fn is_well_formed_code(code: &str) -> bool {
        code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
    }

    /// Checks if the entry has expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Remaining checks under the given limit
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// Seconds until expiry, zero once expired
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        self.expires_at.signed_duration_since(now).num_seconds().max(0)
    }

    /// Checks a submitted code and records the attempt
    ///
    /// Expiry is evaluated before the attempt limit, and neither of those
    /// counts as an attempt. Otherwise the counter is incremented before the
    /// comparison.
    pub fn verify(
        &mut self,
        input_code: &str,
        now: DateTime<Utc>,
        max_attempts: u32,
    ) -> VerificationOutcome {
        if self.is_expired(now) {
            return VerificationOutcome::Expired;
        }

        if self.attempts >= max_attempts {
            return VerificationOutcome::AttemptsExhausted;
        }

        self.attempts += 1;

        if self.code.len() == input_code.len()
            && constant_time_eq(self.code.as_bytes(), input_code.as_bytes())
        {
            VerificationOutcome::Verified
        } else {
            VerificationOutcome::Mismatch {
                attempts_remaining: self.remaining_attempts(max_attempts),
            }
        }
    }
}
