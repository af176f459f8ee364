//! SMS Service Interface
//!
//! Defines the trait for SMS service implementations that handle
//! sending verification codes.

use async_trait::async_trait;

use crate::InfrastructureError;

/// SMS service trait for sending text messages
///
/// Implementations include:
/// - Twilio SMS API
/// - Mock implementation for development and as the fallback path
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Arguments
    ///
    /// * `phone_number` - The recipient's phone number
    /// * `message` - The message content to send
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Unique identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Send a verification code via SMS
    ///
    /// Formats the standard verification message and sends it.
    async fn send_verification_code(
        &self,
        phone_number: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, InfrastructureError> {
        let message = verification_message(code, expires_in_minutes);
        self.send_sms(phone_number, &message).await
    }

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}

/// Standard verification code message
pub fn verification_message(code: &str, expires_in_minutes: i64) -> String {
    let unit = if expires_in_minutes == 1 { "minute" } else { "minutes" };
    format!(
        "Your SiteVerify verification code is: {}. This code will expire in {} {}.",
        code, expires_in_minutes, unit
    )
}
