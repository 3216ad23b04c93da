//! In-memory conversation log.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::domain::conversation::{ConversationRecord, NewConversation};
use crate::domain::foundation::{ConversationId, PersistenceError};
use crate::ports::ConversationLog;

/// In-memory implementation of the ConversationLog port.
#[derive(Debug, Default)]
pub struct InMemoryConversationLog {
    records: Mutex<Vec<ConversationRecord>>,
    failing: AtomicBool,
}

impl InMemoryConversationLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log whose writes always fail.
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            failing: AtomicBool::new(true),
        }
    }

    /// Returns all stored records, oldest first.
    pub fn records(&self) -> Vec<ConversationRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Returns true if nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ConversationLog for InMemoryConversationLog {
    async fn record(
        &self,
        entry: &NewConversation,
    ) -> Result<ConversationRecord, PersistenceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PersistenceError::database("simulated conversation write failure"));
        }

        let mut records = self.records.lock().unwrap();
        let id = ConversationId::from_i64(records.len() as i64 + 1);
        let record = ConversationRecord::from_new(id, entry.clone(), Utc::now());
        records.push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_increase_per_record() {
        let log = InMemoryConversationLog::new();

        let first = log
            .record(&NewConversation::new("whatsapp:+1555", "hi", "hello"))
            .await
            .unwrap();
        let second = log
            .record(&NewConversation::new("whatsapp:+1555", "again", "hello again"))
            .await
            .unwrap();

        assert!(second.id.as_i64() > first.id.as_i64());
        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0].message, "hi");
    }

    #[tokio::test]
    async fn failing_log_stores_nothing() {
        let log = InMemoryConversationLog::failing();

        let result = log
            .record(&NewConversation::new("whatsapp:+1555", "hi", "hello"))
            .await;

        assert!(result.is_err());
        assert!(log.is_empty());
    }
}
