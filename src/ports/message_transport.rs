//! Message transport port - outbound delivery through the messaging provider.

use async_trait::async_trait;

/// Port for sending a message to a sender address.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Deliver `body` to `to` (an addressed form such as `whatsapp:+15551234567`).
    ///
    /// Returns the provider's identifier for the queued message. A single
    /// attempt is made.
    async fn send(&self, to: &str, body: &str) -> Result<String, TransportError>;
}

/// Delivery errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The provider could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The provider refused the message.
    #[error("provider rejected message ({status}): {message}")]
    Rejected {
        /// HTTP status returned by the provider.
        status: u16,
        /// Provider error body.
        message: String,
    },

    /// The provider answered with something we could not read.
    #[error("parse error: {0}")]
    Parse(String),
}

impl TransportError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a rejection error.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_error_displays_status() {
        let err = TransportError::rejected(400, "invalid To number");
        assert_eq!(
            err.to_string(),
            "provider rejected message (400): invalid To number"
        );
    }

    #[test]
    fn message_transport_is_object_safe() {
        fn _accepts_dyn(_transport: &dyn MessageTransport) {}
    }
}
