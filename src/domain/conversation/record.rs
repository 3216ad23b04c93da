//! Conversation log records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ConversationId;

/// One inbound/outbound exchange waiting to be logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConversation {
    /// Sender address exactly as received (`whatsapp:+15551234567`).
    pub sender: String,
    pub message: String,
    pub response: String,
}

impl NewConversation {
    pub fn new(
        sender: impl Into<String>,
        message: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            message: message.into(),
            response: response.into(),
        }
    }
}

/// A logged exchange. Records are insert-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: ConversationId,
    pub sender: String,
    pub message: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationRecord {
    /// Builds the stored record from the pending exchange and store-assigned fields.
    pub fn from_new(id: ConversationId, entry: NewConversation, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            sender: entry.sender,
            message: entry.message,
            response: entry.response,
            created_at,
        }
    }
}
