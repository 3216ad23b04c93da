//! Conversation log port.
//!
//! Insert-only audit trail of answered messages. One record per turn that
//! received an AI response; records are never updated or deleted.

use async_trait::async_trait;

use crate::domain::conversation::{ConversationRecord, NewConversation};
use crate::domain::foundation::PersistenceError;

/// Port for recording answered exchanges.
#[async_trait]
pub trait ConversationLog: Send + Sync {
    /// Persist one exchange and return the stored record.
    ///
    /// # Errors
    ///
    /// - `Database` on storage failure; the write has been rolled back
    async fn record(&self, entry: &NewConversation)
        -> Result<ConversationRecord, PersistenceError>;
}
