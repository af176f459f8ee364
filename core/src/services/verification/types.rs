//! Types for verification service results

use chrono::{DateTime, Utc};

/// Why a code went through the mock path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockReason {
    /// No SMS provider is configured
    ProviderNotConfigured,
    /// The configured provider returned an error
    ProviderFailed,
}

impl MockReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MockReason::ProviderNotConfigured => "provider_not_configured",
            MockReason::ProviderFailed => "provider_failed",
        }
    }
}

/// How the code reached (or would have reached) the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Delivered by the real provider
    Sent { provider: String, message_id: String },
    /// Handled by the mock path
    Mock {
        provider: String,
        reason: MockReason,
        message_id: Option<String>,
    },
}

impl Delivery {
    pub fn is_mock(&self) -> bool {
        matches!(self, Delivery::Mock { .. })
    }

    pub fn provider(&self) -> &str {
        match self {
            Delivery::Sent { provider, .. } | Delivery::Mock { provider, .. } => provider,
        }
    }
}

/// Result of sending a verification code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// How the code was dispatched
    pub delivery: Delivery,
    /// When the issued code expires
    pub expires_at: DateTime<Utc>,
    /// Seconds the code stays valid
    pub expires_in_seconds: i64,
    /// The code itself, only in mock mode outside production
    pub mock_code: Option<String>,
}

/// Result of a successful verification
#[derive(Debug, Clone)]
pub struct VerifyCodeResult {
    /// The verified phone number
    pub phone: String,
    /// When the check succeeded
    pub verified_at: DateTime<Utc>,
}
