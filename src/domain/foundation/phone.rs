//! Phone number value object.
//!
//! Inbound senders arrive in the provider's addressed form
//! (`whatsapp:+15551234567`). Users are keyed by the bare E.164 number, so the
//! channel prefix is stripped and common formatting characters removed.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Maximum number of digits allowed by E.164.
const MAX_DIGITS: usize = 15;

/// Minimum number of digits we accept (country code + subscriber number).
const MIN_DIGITS: usize = 7;

/// E.164 phone number (`+` followed by digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parses a sender address such as `whatsapp:+1 555-123-4567`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when nothing remains after stripping the
    /// channel prefix or the remainder is not a plausible E.164 number.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let without_channel = match trimmed.rsplit_once(':') {
            Some((_, number)) => number,
            None => trimmed,
        };

        let compact: String = without_channel
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
            .collect();

        if compact.is_empty() {
            return Err(ValidationError::empty_field("phone_number"));
        }

        let digits = compact.strip_prefix('+').unwrap_or(&compact);

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "phone_number",
                "must contain only digits after the leading '+'",
            ));
        }
        if digits.len() < MIN_DIGITS || digits.len() > MAX_DIGITS {
            return Err(ValidationError::invalid_format(
                "phone_number",
                format!("expected {}-{} digits, got {}", MIN_DIGITS, MAX_DIGITS, digits.len()),
            ));
        }

        Ok(Self(format!("+{}", digits)))
    }

    /// Returns the normalized number (`+15551234567`).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_whatsapp_prefix() {
        let phone = PhoneNumber::parse("whatsapp:+15551234567").unwrap();
        assert_eq!(phone.as_str(), "+15551234567");
    }

    #[test]
    fn accepts_bare_number() {
        let phone = PhoneNumber::parse("+15551234567").unwrap();
        assert_eq!(phone.as_str(), "+15551234567");
    }

    #[test]
    fn adds_missing_plus() {
        let phone = PhoneNumber::parse("whatsapp:15551234567").unwrap();
        assert_eq!(phone.as_str(), "+15551234567");
    }

    #[test]
    fn removes_formatting_characters() {
        let phone = PhoneNumber::parse(" whatsapp:+1 (555) 123-4567 ").unwrap();
        assert_eq!(phone.as_str(), "+15551234567");
    }

    #[test]
    fn same_number_in_both_forms_is_equal() {
        assert_eq!(
            PhoneNumber::parse("whatsapp:+15551234567").unwrap(),
            PhoneNumber::parse("+15551234567").unwrap()
        );
    }

    #[test]
    fn rejects_empty_sender() {
        assert_eq!(
            PhoneNumber::parse("whatsapp:"),
            Err(ValidationError::empty_field("phone_number"))
        );
    }

    #[test]
    fn rejects_letters() {
        assert!(PhoneNumber::parse("whatsapp:+1555abc4567").is_err());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(PhoneNumber::parse("+12345").is_err());
        assert!(PhoneNumber::parse("+1234567890123456").is_err());
    }
}
