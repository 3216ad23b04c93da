//! Messaging provider configuration (Twilio WhatsApp)

use serde::Deserialize;

use super::error::ValidationError;

/// Twilio configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MessagingConfig {
    /// Twilio account SID
    #[serde(default)]
    pub twilio_account_sid: String,

    /// Twilio auth token
    #[serde(default)]
    pub twilio_auth_token: String,

    /// WhatsApp sender number, with or without the `whatsapp:` prefix
    #[serde(default)]
    pub twilio_phone_number: String,

    /// Twilio REST API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl MessagingConfig {
    /// Validate messaging configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.twilio_account_sid.is_empty() {
            return Err(ValidationError::MissingRequired("MESSAGING__TWILIO_ACCOUNT_SID"));
        }
        if self.twilio_auth_token.is_empty() {
            return Err(ValidationError::MissingRequired("MESSAGING__TWILIO_AUTH_TOKEN"));
        }
        if self.twilio_phone_number.is_empty() {
            return Err(ValidationError::MissingRequired("MESSAGING__TWILIO_PHONE_NUMBER"));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidUrl("MESSAGING__API_BASE_URL"));
        }
        Ok(())
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            twilio_account_sid: String::new(),
            twilio_auth_token: String::new(),
            twilio_phone_number: String::new(),
            api_base_url: default_api_base_url(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.twilio.com".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> MessagingConfig {
        MessagingConfig {
            twilio_account_sid: "AC123".to_string(),
            twilio_auth_token: "token".to_string(),
            twilio_phone_number: "+14155238886".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_sid() {
        let config = MessagingConfig {
            twilio_account_sid: String::new(),
            ..valid()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("MESSAGING__TWILIO_ACCOUNT_SID"))
        );
    }

    #[test]
    fn test_validation_missing_sender_number() {
        let config = MessagingConfig {
            twilio_phone_number: String::new(),
            ..valid()
        };
        assert!(config.validate().is_err());
    }
}
