//! Main verification service implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;
use sv_shared::phone::{is_acceptable_length, mask_phone_number, PHONE_MAX_LENGTH, PHONE_MIN_LENGTH};

use crate::domain::entities::verification_entry::{VerificationEntry, VerificationOutcome, CODE_LENGTH};
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::services::clock::{Clock, SystemClock};

use super::config::VerificationServiceConfig;
use super::traits::{CodeStoreTrait, RateLimiterTrait, SmsServiceTrait};
use super::types::{Delivery, MockReason, SendCodeResult, VerifyCodeResult};

/// Verification service for issuing and checking SMS verification codes
pub struct VerificationService<C: CodeStoreTrait, R: RateLimiterTrait> {
    /// Pending codes keyed by phone number
    code_store: Arc<C>,
    /// Issuance rate limiter keyed by caller
    rate_limiter: Arc<R>,
    /// Real SMS provider, absent when none is configured
    sms_provider: Option<Arc<dyn SmsServiceTrait>>,
    /// Fallback used when the real provider is absent or fails
    mock_sms: Arc<dyn SmsServiceTrait>,
    /// Time source for expiry and window checks
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<C: CodeStoreTrait, R: RateLimiterTrait> VerificationService<C, R> {
    /// Create a new verification service in mock mode
    ///
    /// # Arguments
    ///
    /// * `code_store` - Code store implementation
    /// * `rate_limiter` - Rate limiter implementation
    /// * `mock_sms` - Mock SMS service used as the fallback path
    /// * `config` - Service configuration
    pub fn new(
        code_store: Arc<C>,
        rate_limiter: Arc<R>,
        mock_sms: Arc<dyn SmsServiceTrait>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            code_store,
            rate_limiter,
            sms_provider: None,
            mock_sms,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Attach a real SMS provider
    pub fn with_sms_provider(mut self, provider: Option<Arc<dyn SmsServiceTrait>>) -> Self {
        self.sms_provider = provider;
        self
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Whether a real SMS provider is attached
    pub fn has_sms_provider(&self) -> bool {
        self.sms_provider.is_some()
    }

    /// Send a verification code to a phone number
    ///
    /// This method:
    /// 1. Validates the phone number length
    /// 2. Sweeps expired codes and rate limit windows
    /// 3. Checks the caller's issuance rate limit
    /// 4. Generates a new code and stores it, replacing any pending one
    /// 5. Dispatches it through the provider, falling back to the mock path
    ///
    /// # Arguments
    ///
    /// * `phone` - The phone number to send the code to
    /// * `client_key` - Identifier of the caller for rate limiting
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - How the code was dispatched
    /// * `Err(DomainError)` - Validation, rate limit or storage failure
    pub async fn send_verification_code(
        &self,
        phone: &str,
        client_key: &str,
    ) -> DomainResult<SendCodeResult> {
        validate_phone(phone)?;

        let masked = mask_phone_number(phone);
        let now = self.clock.now();

        self.cleanup(now).await;

        let allowed = self
            .rate_limiter
            .check_rate_limit(client_key, now)
            .await
            .map_err(|e| {
                tracing::error!(
                    client = client_key,
                    error = %e,
                    event = "rate_limit_check_failed",
                    "Rate limiter failed"
                );
                DomainError::Internal {
                    message: format!("Failed to check rate limit: {}", e),
                }
            })?;

        if !allowed {
            tracing::warn!(
                phone = %masked,
                client = client_key,
                event = "rate_limit_exceeded",
                "Verification code request rate limit exceeded"
            );
            return Err(VerificationError::RateLimitExceeded.into());
        }

        let entry = VerificationEntry::generate(now, self.config.ttl());
        let code = entry.code.clone();
        let expires_at = entry.expires_at;

        self.code_store
            .store_code(phone, entry)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %masked,
                    error = %e,
                    event = "otp_storage_failed",
                    "Failed to store verification code"
                );
                DomainError::Internal {
                    message: format!("Failed to store verification code: {}", e),
                }
            })?;

        tracing::info!(
            phone = %masked,
            event = "otp_generated",
            expires_at = %expires_at,
            "Generated new verification code"
        );

        let delivery = self.dispatch(phone, &masked, &code).await;

        let mock_code = if delivery.is_mock() && self.config.expose_mock_code {
            Some(code)
        } else {
            None
        };

        Ok(SendCodeResult {
            delivery,
            expires_at,
            expires_in_seconds: self.config.ttl_seconds(),
            mock_code,
        })
    }

    /// Verify a code for a phone number
    ///
    /// A successful check consumes the pending entry. Expired and exhausted
    /// entries are removed, as is an entry whose last attempt was a mismatch.
    ///
    /// # Arguments
    ///
    /// * `phone` - The phone number associated with the code
    /// * `code` - The verification code to verify
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyCodeResult)` - The code matched
    /// * `Err(DomainError)` - Validation, verification or storage failure
    pub async fn verify_code(&self, phone: &str, code: &str) -> DomainResult<VerifyCodeResult> {
        validate_phone(phone)?;

        let masked = mask_phone_number(phone);

        if !VerificationEntry::is_well_formed_code(code) {
            tracing::warn!(
                phone = %masked,
                event = "invalid_code_format",
                code_length = code.len(),
                "Invalid verification code format provided"
            );
            return Err(DomainError::Validation {
                message: format!("code must be exactly {} digits", CODE_LENGTH),
            });
        }

        let now = self.clock.now();

        let outcome = self
            .code_store
            .verify_code(phone, code, now, self.config.attempt_limit())
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %masked,
                    error = %e,
                    event = "otp_verification_error",
                    "System error during code verification"
                );
                DomainError::Internal {
                    message: format!("Failed to verify code: {}", e),
                }
            })?;

        match outcome {
            None => {
                tracing::info!(
                    phone = %masked,
                    event = "otp_not_pending",
                    "No pending verification for phone number"
                );
                Err(VerificationError::NoPendingVerification.into())
            }
            Some(VerificationOutcome::Verified) => {
                tracing::info!(
                    phone = %masked,
                    event = "otp_verified_success",
                    "Verification code successfully verified"
                );
                Ok(VerifyCodeResult {
                    phone: phone.to_string(),
                    verified_at: now,
                })
            }
            Some(VerificationOutcome::Expired) => {
                tracing::info!(
                    phone = %masked,
                    event = "otp_expired",
                    "Verification code expired"
                );
                Err(VerificationError::CodeExpired.into())
            }
            Some(VerificationOutcome::AttemptsExhausted) => {
                tracing::warn!(
                    phone = %masked,
                    event = "max_attempts_exceeded",
                    "Maximum verification attempts exceeded for phone number"
                );
                Err(VerificationError::MaxAttemptsExceeded.into())
            }
            Some(VerificationOutcome::Mismatch { attempts_remaining }) => {
                tracing::warn!(
                    phone = %masked,
                    event = "otp_verification_failed",
                    remaining_attempts = attempts_remaining,
                    "Verification code verification failed"
                );
                Err(VerificationError::InvalidCode { attempts_remaining }.into())
            }
        }
    }

    /// Sweep expired codes and rate limit windows
    ///
    /// Failures are logged and otherwise ignored; the sweep is best effort.
    async fn cleanup(&self, now: DateTime<Utc>) {
        match self.code_store.purge_expired(now).await {
            Ok(0) => {}
            Ok(removed) => tracing::debug!(removed, event = "otp_cleanup", "Purged expired codes"),
            Err(e) => tracing::warn!(error = %e, event = "otp_cleanup_failed", "Code sweep failed"),
        }

        match self.rate_limiter.purge_expired(now).await {
            Ok(0) => {}
            Ok(removed) => {
                tracing::debug!(removed, event = "rate_limit_cleanup", "Purged rate limit windows")
            }
            Err(e) => {
                tracing::warn!(error = %e, event = "rate_limit_cleanup_failed", "Rate limit sweep failed")
            }
        }
    }

    /// Send through the real provider if there is one, otherwise or on failure
    /// through the mock path. Never fails.
    async fn dispatch(&self, phone: &str, masked: &str, code: &str) -> Delivery {
        let ttl_minutes = self.config.ttl_minutes();

        let reason = match &self.sms_provider {
            Some(provider) => {
                match provider.send_verification_code(phone, code, ttl_minutes).await {
                    Ok(message_id) => {
                        tracing::info!(
                            phone = %masked,
                            provider = provider.provider_name(),
                            message_id = %message_id,
                            event = "sms_sent",
                            "Verification code sent"
                        );
                        return Delivery::Sent {
                            provider: provider.provider_name().to_string(),
                            message_id,
                        };
                    }
                    Err(e) => {
                        tracing::error!(
                            phone = %masked,
                            provider = provider.provider_name(),
                            error = %e,
                            event = "sms_send_failed",
                            "SMS provider failed, falling back to mock delivery"
                        );
                        MockReason::ProviderFailed
                    }
                }
            }
            None => MockReason::ProviderNotConfigured,
        };

        let message_id = match self.mock_sms.send_verification_code(phone, code, ttl_minutes).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(
                    phone = %masked,
                    error = %e,
                    event = "mock_sms_failed",
                    "Mock SMS delivery failed"
                );
                None
            }
        };

        tracing::info!(
            phone = %masked,
            reason = reason.as_str(),
            event = "sms_mock_delivery",
            "Verification code handled in mock mode"
        );

        Delivery::Mock {
            provider: self.mock_sms.provider_name().to_string(),
            reason,
            message_id,
        }
    }
}

fn validate_phone(phone: &str) -> DomainResult<()> {
    if is_acceptable_length(phone) {
        Ok(())
    } else {
        Err(DomainError::Validation {
            message: format!(
                "phone must be between {} and {} characters",
                PHONE_MIN_LENGTH, PHONE_MAX_LENGTH
            ),
        })
    }
}
