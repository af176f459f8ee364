//! Mock SMS Service Implementation
//!
//! Logs verification messages instead of sending them. Used in development
//! and as the fallback when the real provider is unavailable.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use sv_shared::phone::{is_acceptable_length, mask_phone_number};

use super::sms_service::SmsService;
use crate::InfrastructureError;

/// Mock SMS service for development and testing
///
/// This implementation:
/// - Logs the full message, code included, unless content logging is off
/// - Sleeps for the configured delay to simulate delivery
/// - Generates mock message IDs
/// - Tracks message count for testing
#[derive(Clone)]
pub struct MockSmsService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Simulated delivery delay
    delay: Duration,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether the message body is written to the log
    log_content: bool,
}

impl MockSmsService {
    /// Create a new mock SMS service without delay
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    /// Create a mock service that waits `delay` before reporting delivery
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            delay,
            simulate_failure: false,
            log_content: true,
        }
    }

    /// Enable or disable logging of the message body
    ///
    /// The body carries the verification code, so it must stay out of the
    /// log wherever codes are not disclosed to callers.
    pub fn with_content_logging(mut self, enabled: bool) -> Self {
        self.log_content = enabled;
        self
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let masked_phone = mask_phone_number(phone_number);

        if !is_acceptable_length(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                masked_phone
            )));
        }

        if self.simulate_failure {
            warn!(
                "Mock SMS service simulating failure for phone: {}",
                masked_phone
            );
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.log_content {
            info!(
                target: "sms_service",
                provider = "mock",
                phone = %masked_phone,
                message_id = %message_id,
                count,
                content = message,
                "SMS delivered (mock)"
            );
        } else {
            info!(
                target: "sms_service",
                provider = "mock",
                phone = %masked_phone,
                message_id = %message_id,
                count,
                "SMS delivered (mock, content withheld)"
            );
        }

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_sms_send_success() {
        let service = MockSmsService::new();
        let result = service.send_sms("+15551234567", "Test message").await;

        let message_id = result.unwrap();
        assert!(message_id.starts_with("mock_"));
        assert_eq!(service.get_message_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_sms_accepts_short_local_numbers() {
        let service = MockSmsService::new();
        assert!(service.send_sms("12345", "Test message").await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_sms_invalid_phone() {
        let service = MockSmsService::new();
        let result = service.send_sms("1234", "Test message").await;

        match result {
            Err(InfrastructureError::Sms(msg)) => assert!(msg.contains("Invalid phone number")),
            other => panic!("Expected Sms error, got {:?}", other),
        }
        assert_eq!(service.get_message_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_sms_simulate_failure() {
        let mut service = MockSmsService::new();
        service.set_simulate_failure(true);

        assert!(service.send_sms("+15551234567", "Test message").await.is_err());
        assert!(!service.is_available().await);
    }

    #[tokio::test]
    async fn test_mock_sms_delivers_with_content_logging_off() {
        let service = MockSmsService::new().with_content_logging(false);

        let message_id = service
            .send_verification_code("+15551234567", "482913", 5)
            .await
            .unwrap();

        assert!(message_id.starts_with("mock_"));
        assert_eq!(service.get_message_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_sms_waits_for_delay() {
        let service = MockSmsService::with_delay(Duration::from_millis(500));
        let started = tokio::time::Instant::now();

        service
            .send_verification_code("+15551234567", "123456", 5)
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_mock_sms_counter() {
        let service = MockSmsService::new();

        for i in 1..=3 {
            let _ = service.send_sms("+15551234567", &format!("Message {}", i)).await;
            assert_eq!(service.get_message_count(), i);
        }

        service.reset_counter();
        assert_eq!(service.get_message_count(), 0);
    }
}
