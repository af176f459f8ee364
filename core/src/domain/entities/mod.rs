//! Domain entities representing core business objects.

pub mod rate_limit_entry;
pub mod verification_entry;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use rate_limit_entry::RateLimitEntry;
pub use verification_entry::{
    VerificationEntry, VerificationOutcome, CODE_LENGTH, DEFAULT_TTL_SECONDS, MAX_ATTEMPTS,
};
