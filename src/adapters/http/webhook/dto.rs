//! HTTP DTOs for the webhook endpoints.

use serde::{Deserialize, Serialize};

/// Form posted by the messaging provider for every inbound message.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessageForm {
    /// Message text.
    #[serde(rename = "Body")]
    pub body: String,
    /// Sender address (`whatsapp:+15551234567`).
    #[serde(rename = "From")]
    pub from: String,
}

/// Liveness payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub msg: String,
}

impl HealthResponse {
    pub fn up() -> Self {
        Self {
            msg: "up & running".to_string(),
        }
    }
}
