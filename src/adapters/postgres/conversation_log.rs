//! PostgreSQL implementation of ConversationLog.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::conversation::{ConversationRecord, NewConversation};
use crate::domain::foundation::{ConversationId, PersistenceError};
use crate::ports::ConversationLog;

/// PostgreSQL implementation of ConversationLog.
#[derive(Clone)]
pub struct PostgresConversationLog {
    pool: PgPool,
}

impl PostgresConversationLog {
    /// Creates a new PostgresConversationLog.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationLog for PostgresConversationLog {
    async fn record(
        &self,
        entry: &NewConversation,
    ) -> Result<ConversationRecord, PersistenceError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            PersistenceError::database(format!("Failed to start transaction: {}", e))
        })?;

        let row = sqlx::query(
            r#"
            INSERT INTO conversations (sender, message, response)
            VALUES ($1, $2, $3)
            RETURNING id, created_at
            "#,
        )
        .bind(&entry.sender)
        .bind(&entry.message)
        .bind(&entry.response)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            PersistenceError::database(format!("Failed to insert conversation: {}", e))
        })?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| PersistenceError::decode(format!("column 'id': {}", e)))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| PersistenceError::decode(format!("column 'created_at': {}", e)))?;

        tx.commit().await.map_err(|e| {
            PersistenceError::database(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(ConversationRecord::from_new(
            ConversationId::from_i64(id),
            entry.clone(),
            created_at,
        ))
    }
}
