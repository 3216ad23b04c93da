//! Mock message transport for testing.
//!
//! Records every delivery and can be told to fail.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::ports::{MessageTransport, TransportError};

/// A message handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: String,
    pub body: String,
}

/// Mock transport that records deliveries.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    failure: Option<TransportError>,
}

impl MockTransport {
    /// Creates a transport that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport that fails every delivery with `error`.
    ///
    /// Attempts are still recorded.
    pub fn failing(error: TransportError) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            failure: Some(error),
        }
    }

    /// Returns all delivery attempts.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Returns the number of delivery attempts.
    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MessageTransport for MockTransport {
    async fn send(&self, to: &str, body: &str) -> Result<String, TransportError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentMessage {
            to: to.to_string(),
            body: body.to_string(),
        });

        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(format!("SM{:032}", sent.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_deliveries() {
        let transport = MockTransport::new();

        let sid = transport.send("whatsapp:+15551234567", "Hi").await.unwrap();

        assert!(sid.starts_with("SM"));
        assert_eq!(
            transport.sent(),
            vec![SentMessage {
                to: "whatsapp:+15551234567".to_string(),
                body: "Hi".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn failing_transport_returns_error_and_records_attempt() {
        let transport = MockTransport::failing(TransportError::network("down"));

        let result = transport.send("whatsapp:+15551234567", "Hi").await;

        assert_eq!(result, Err(TransportError::network("down")));
        assert_eq!(transport.send_count(), 1);
    }
}
