//! Twilio messaging adapter.
//!
//! Implements the `MessageTransport` port with Twilio's Messages API. Replies
//! go out over WhatsApp from the configured sender number.
//!
//! # Configuration
//!
//! ```ignore
//! let config = TwilioConfig::new(account_sid, auth_token, "+14155238886");
//! let transport = TwilioTransport::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::ports::{MessageTransport, TransportError};

/// Channel prefix used for WhatsApp addresses.
const WHATSAPP_PREFIX: &str = "whatsapp:";

/// Twilio API configuration.
#[derive(Clone)]
pub struct TwilioConfig {
    /// Account SID (AC...). Also the basic-auth username.
    account_sid: String,

    /// Auth token. Basic-auth password.
    auth_token: SecretString,

    /// Sender number in E.164 form, without channel prefix.
    from_number: String,

    /// Base URL for the Twilio API (default: https://api.twilio.com).
    api_base_url: String,
}

impl TwilioConfig {
    /// Create a new Twilio configuration.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: SecretString::new(auth_token.into()),
            from_number: from_number.into(),
            api_base_url: "https://api.twilio.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sender address in WhatsApp form.
    fn sender_address(&self) -> String {
        if self.from_number.starts_with(WHATSAPP_PREFIX) {
            self.from_number.clone()
        } else {
            format!("{}{}", WHATSAPP_PREFIX, self.from_number)
        }
    }
}

/// Twilio message transport.
pub struct TwilioTransport {
    config: TwilioConfig,
    http_client: reqwest::Client,
}

impl TwilioTransport {
    /// Create a new Twilio transport with the given configuration.
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base_url, self.config.account_sid
        )
    }

    fn message_params(&self, to: &str, body: &str) -> Vec<(&'static str, String)> {
        vec![
            ("From", self.config.sender_address()),
            ("To", to.to_string()),
            ("Body", body.to_string()),
        ]
    }
}

#[async_trait]
impl MessageTransport for TwilioTransport {
    async fn send(&self, to: &str, body: &str) -> Result<String, TransportError> {
        let response = self
            .http_client
            .post(self.messages_url())
            .basic_auth(
                &self.config.account_sid,
                Some(self.config.auth_token.expose_secret()),
            )
            .form(&self.message_params(to, body))
            .send()
            .await
            .map_err(|e| TransportError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), error = %error_text, "Twilio send failed");
            return Err(TransportError::rejected(status.as_u16(), error_text));
        }

        let message: TwilioMessage = response
            .json()
            .await
            .map_err(|e| TransportError::Parse(format!("Failed to parse Twilio response: {}", e)))?;

        tracing::info!(sid = %message.sid, status = ?message.status, "Message queued with Twilio");

        Ok(message.sid)
    }
}

/// Subset of Twilio's message resource we read back.
#[derive(Debug, Deserialize)]
struct TwilioMessage {
    sid: String,
    status: Option<String>,
}
