//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Shortest phone number accepted by the verification endpoints
pub const PHONE_MIN_LENGTH: usize = 5;

/// Longest phone number accepted by the verification endpoints
pub const PHONE_MAX_LENGTH: usize = 20;

// International phone number regex (E.164 format)
static E164_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{1,14}$").expect("E.164 pattern is valid")
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check the length bounds used by request validation
///
/// The format is otherwise left to the caller; numbers are used as opaque keys.
pub fn is_acceptable_length(phone: &str) -> bool {
    let len = phone.chars().count();
    (PHONE_MIN_LENGTH..=PHONE_MAX_LENGTH).contains(&len)
}

/// Check if a phone number is in strict E.164 format
pub fn is_e164(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

/// Mask a phone number for logs, keeping the leading three and last four characters
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 8 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
