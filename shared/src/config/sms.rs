//! SMS provider configuration module

use serde::{Deserialize, Serialize};

use super::{env_opt, env_or};

/// Most send attempts against the provider per message
pub const MAX_SMS_RETRIES: u32 = 10;

/// Longest retry delay in milliseconds, also the cap for the backoff
pub const MAX_RETRY_DELAY_MS: u64 = 60_000;

/// Supported SMS providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Log codes instead of sending them
    Mock,
    /// Twilio programmable messaging
    Twilio,
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" | "none" => Ok(SmsProvider::Mock),
            "twilio" => Ok(SmsProvider::Twilio),
            _ => Err(format!("Unknown SMS provider: {}", s)),
        }
    }
}

/// SMS provider configuration
///
/// Credentials are optional. When any of them is missing the provider is
/// treated as unconfigured and issuance runs in mock mode.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Selected provider
    pub provider: SmsProvider,

    /// Twilio account SID
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Twilio auth token
    #[serde(default, skip_serializing)]
    pub auth_token: Option<String>,

    /// Sender number in E.164 format
    #[serde(default)]
    pub from_number: Option<String>,

    /// Maximum send attempts against the provider
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry delay in milliseconds, doubled after each failure
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::Mock,
            account_sid: None,
            auth_token: None,
            from_number: None,
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl SmsConfig {
    /// Load from `SMS_PROVIDER` and the `TWILIO_*` variables
    ///
    /// Without an explicit `SMS_PROVIDER`, Twilio is selected when its
    /// credentials are present.
    pub fn from_env() -> Self {
        let account_sid = env_opt("TWILIO_ACCOUNT_SID");
        let auth_token = env_opt("TWILIO_AUTH_TOKEN");
        let from_number = env_opt("TWILIO_FROM_NUMBER");

        let has_credentials =
            account_sid.is_some() && auth_token.is_some() && from_number.is_some();
        let provider = env_opt("SMS_PROVIDER")
            .and_then(|p| p.parse().ok())
            .unwrap_or(if has_credentials {
                SmsProvider::Twilio
            } else {
                SmsProvider::Mock
            });

        Self {
            provider,
            account_sid,
            auth_token,
            from_number,
            max_retries: env_or("TWILIO_MAX_RETRIES", default_max_retries()),
            retry_delay_ms: env_or("TWILIO_RETRY_DELAY_MS", default_retry_delay_ms()),
        }
        .bounded()
    }

    /// Clamp the retry policy to between one and [`MAX_SMS_RETRIES`] attempts
    /// and at most [`MAX_RETRY_DELAY_MS`] of delay
    pub fn bounded(self) -> Self {
        Self {
            max_retries: self.max_retries.clamp(1, MAX_SMS_RETRIES),
            retry_delay_ms: self.retry_delay_ms.min(MAX_RETRY_DELAY_MS),
            ..self
        }
    }

    /// A real provider is selected and every credential it needs is present
    pub fn is_configured(&self) -> bool {
        match self.provider {
            SmsProvider::Mock => false,
            SmsProvider::Twilio => {
                self.account_sid.is_some() && self.auth_token.is_some() && self.from_number.is_some()
            }
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twilio_config() -> SmsConfig {
        SmsConfig {
            provider: SmsProvider::Twilio,
            account_sid: Some("ACtest".to_string()),
            auth_token: Some("token".to_string()),
            from_number: Some("+15550000000".to_string()),
            ..SmsConfig::default()
        }
    }

    #[test]
    fn test_mock_is_never_configured() {
        assert!(!SmsConfig::default().is_configured());
    }

    #[test]
    fn test_twilio_requires_all_credentials() {
        assert!(twilio_config().is_configured());

        let missing_token = SmsConfig {
            auth_token: None,
            ..twilio_config()
        };
        assert!(!missing_token.is_configured());

        let missing_from = SmsConfig {
            from_number: None,
            ..twilio_config()
        };
        assert!(!missing_from.is_configured());
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("Twilio".parse::<SmsProvider>().unwrap(), SmsProvider::Twilio);
        assert_eq!("mock".parse::<SmsProvider>().unwrap(), SmsProvider::Mock);
        assert!("carrier-pigeon".parse::<SmsProvider>().is_err());
    }

    #[test]
    fn test_bounded_retry_policy() {
        let config = SmsConfig {
            max_retries: 0,
            retry_delay_ms: u64::MAX,
            ..twilio_config()
        }
        .bounded();
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.retry_delay_ms, MAX_RETRY_DELAY_MS);
        assert!(config.is_configured());

        let many = SmsConfig {
            max_retries: 1_000,
            ..SmsConfig::default()
        }
        .bounded();
        assert_eq!(many.max_retries, MAX_SMS_RETRIES);
    }
}
