use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors};

/// Field name to error messages
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Phone number the code is sent to, e.g. "+15551234567"
    #[serde(default)]
    #[validate(length(min = 5, max = 20, message = "Phone must be between 5 and 20 characters"))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckCodeRequest {
    /// Phone number the code was sent to
    #[serde(default)]
    #[validate(length(min = 5, max = 20, message = "Phone must be between 5 and 20 characters"))]
    pub phone: String,

    /// 6-digit verification code
    #[serde(default)]
    #[validate(length(equal = 6, message = "Code must be exactly 6 characters"))]
    pub code: String,
}

impl CheckCodeRequest {
    /// Length rules from the derive plus the digits-only rule for `code`
    pub fn field_errors(&self) -> Option<FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => to_field_errors(&e),
        };

        if !self.code.is_empty() && !self.code.chars().all(|c| c.is_ascii_digit()) {
            errors
                .entry("code".to_string())
                .or_default()
                .push("Code must contain only digits".to_string());
        }

        if errors.is_empty() {
            None
        } else {
            Some(errors)
        }
    }
}

/// Convert validator output into the field error map used in responses
pub fn to_field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Debug details returned with a disclosed mock code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MockDebugInfo {
    pub provider: String,
    pub reason: String,
    pub expires_in_seconds: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeResponse {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<MockDebugInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckCodeResponse {
    pub message: String,

    pub verified: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_remaining: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

/// Error body for endpoints without a `verified` flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }

    pub fn validation(errors: FieldErrors) -> Self {
        Self {
            message: VALIDATION_ERROR_MESSAGE.to_string(),
            errors: Some(errors),
        }
    }
}

pub const VALIDATION_ERROR_MESSAGE: &str = "Validation error";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";
