//! SMS Service Trait Adapter
//!
//! Implements the core `SmsServiceTrait` for any infrastructure
//! [`SmsService`], bridging provider implementations with the
//! verification service.

use async_trait::async_trait;
use sv_core::services::verification::SmsServiceTrait;

use crate::sms::sms_service::SmsService;

/// Adapter that implements the core SmsServiceTrait for an SMS service
pub struct SmsServiceAdapter<T: SmsService> {
    inner: T,
}

impl<T: SmsService> SmsServiceAdapter<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Access the wrapped service
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: SmsService> SmsServiceTrait for SmsServiceAdapter<T> {
    async fn send_verification_code(
        &self,
        phone: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        if !self.inner.is_available().await {
            return Err(format!("{} provider unavailable", self.inner.provider_name()));
        }

        self.inner
            .send_verification_code(phone, code, expires_in_minutes)
            .await
            .map_err(|e| e.to_string())
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}
