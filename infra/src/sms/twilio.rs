//! Twilio SMS Service Implementation
//!
//! Sends verification codes through the Twilio messaging API.
//!
//! ## Features
//!
//! - E.164 normalisation of recipient numbers
//! - Retry with exponential backoff on rate limit and server errors
//! - No retry on client errors
//! - Phone number masking in logs

use async_trait::async_trait;
use phonenumber::{Mode, PhoneNumber};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use twilio::{Client, OutboundMessage};

use sv_shared::config::sms::{MAX_RETRY_DELAY_MS, MAX_SMS_RETRIES};
use sv_shared::phone::{is_e164, mask_phone_number};
use sv_shared::SmsConfig;

use crate::{sms::sms_service::SmsService, InfrastructureError};

/// Twilio limit for a single message body
const MAX_MESSAGE_LENGTH: usize = 1600;

/// Twilio SMS service configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Maximum send attempts
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
}

impl TwilioConfig {
    /// Build from the shared SMS configuration
    ///
    /// Fails when any credential is missing or the sender is not E.164.
    /// The retry policy is clamped to the supported range.
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        let account_sid = required(&config.account_sid, "TWILIO_ACCOUNT_SID")?;
        let auth_token = required(&config.auth_token, "TWILIO_AUTH_TOKEN")?;
        let from_number = required(&config.from_number, "TWILIO_FROM_NUMBER")?;

        if !is_e164(&from_number) {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (e.g., +15551234567)".to_string(),
            ));
        }

        Ok(Self {
            account_sid,
            auth_token,
            from_number,
            max_retries: config.max_retries.clamp(1, MAX_SMS_RETRIES),
            retry_delay_ms: config.retry_delay_ms.min(MAX_RETRY_DELAY_MS),
        })
    }
}

fn required(value: &Option<String>, name: &str) -> Result<String, InfrastructureError> {
    value
        .clone()
        .ok_or_else(|| InfrastructureError::Config(format!("{} not set", name)))
}

/// Double the backoff, capped at the longest supported delay
fn next_delay(delay: Duration) -> Duration {
    delay
        .saturating_mul(2)
        .min(Duration::from_millis(MAX_RETRY_DELAY_MS))
}

/// How a failed send should be handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureKind {
    RateLimited,
    ServerError,
    ClientError,
    Unknown,
}

impl FailureKind {
    fn classify(error_msg: &str) -> Self {
        let lower = error_msg.to_lowercase();
        if lower.contains("429") || lower.contains("rate") {
            FailureKind::RateLimited
        } else if ["500", "502", "503", "504"].iter().any(|s| lower.contains(s)) {
            FailureKind::ServerError
        } else if lower.contains("400") || lower.contains("invalid") {
            FailureKind::ClientError
        } else {
            FailureKind::Unknown
        }
    }

    fn is_retryable(self) -> bool {
        !matches!(self, FailureKind::ClientError)
    }
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: TwilioConfig) -> Self {
        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(
            "Twilio SMS service initialized with from number: {}",
            mask_phone_number(&config.from_number)
        );

        Self { client, config }
    }

    /// Create from the shared SMS configuration
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        Ok(Self::new(TwilioConfig::from_sms_config(config)?))
    }

    /// Validate and normalize phone number to E.164 format
    fn normalize_phone_number(phone: &str) -> Result<String, InfrastructureError> {
        let candidate = if phone.starts_with('+') {
            phone.to_string()
        } else {
            // Assume North American numbering when no country code is given
            format!("+1{}", phone)
        };

        match candidate.parse::<PhoneNumber>() {
            Ok(parsed) => {
                let formatted = parsed.format().mode(Mode::E164).to_string();
                if !phone.starts_with('+') {
                    warn!(
                        "Phone number missing country code, assumed US: {}",
                        mask_phone_number(&formatted)
                    );
                }
                debug!("Validated phone number: {}", mask_phone_number(&formatted));
                Ok(formatted)
            }
            Err(e) => {
                error!("Invalid phone number format: {}", e);
                Err(InfrastructureError::Sms(format!(
                    "Phone number must be in E.164 format (e.g., +15551234567): {}",
                    e
                )))
            }
        }
    }

    /// Send SMS with retry logic
    async fn send_with_retry(&self, to: &str, message: &str) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending SMS attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_phone_number(to)
            );

            let msg = OutboundMessage::new(&self.config.from_number, to, message);

            match self.client.send_message(msg).await {
                Ok(response) => {
                    info!(
                        "SMS sent successfully to {} with SID: {}",
                        mask_phone_number(to),
                        response.sid
                    );
                    return Ok(response.sid);
                }
                Err(e) => {
                    let error_msg = e.to_string();
                    error!(
                        "Failed to send SMS (attempt {}/{}): {}",
                        attempts, self.config.max_retries, error_msg
                    );

                    let kind = FailureKind::classify(&error_msg);
                    if !kind.is_retryable() {
                        return Err(InfrastructureError::Sms(format!(
                            "Invalid request: {}",
                            error_msg
                        )));
                    }

                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Sms(format!(
                            "Failed to send SMS after {} attempts: {}",
                            attempts, error_msg
                        )));
                    }

                    match kind {
                        FailureKind::RateLimited => {
                            warn!("Rate limit detected, backing off for {:?}", delay)
                        }
                        FailureKind::ServerError => {
                            warn!("Server error detected, retrying after {:?}", delay)
                        }
                        _ => warn!("Retrying after {:?}", delay),
                    }

                    tokio::time::sleep(delay).await;
                    delay = next_delay(delay);
                }
            }
        }
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let normalized_phone = Self::normalize_phone_number(phone_number)?;

        info!(
            "Sending SMS to {} via Twilio (message length: {} chars)",
            mask_phone_number(&normalized_phone),
            message.len()
        );

        if message.len() > MAX_MESSAGE_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        self.send_with_retry(&normalized_phone, message).await
    }

    fn provider_name(&self) -> &str {
        "twilio"
    }
}
