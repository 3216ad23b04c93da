//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresProfileStore` - Users, farms and crops
//! - `PostgresConversationLog` - Insert-only conversation records
//!
//! plus pool construction and the embedded schema migrations.

mod conversation_log;
mod profile_store;

pub use conversation_log::PostgresConversationLog;
pub use profile_store::PostgresProfileStore;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::PersistenceError;

/// Opens the connection pool described by the configuration.
///
/// # Errors
///
/// Returns `PersistenceError::Database` if the first connection cannot be
/// established.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, PersistenceError> {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.name)
        .username(&config.user)
        .password(&config.password);

    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect_with(options)
        .await
        .map_err(|e| PersistenceError::database(format!("Failed to connect to database: {}", e)))
}

/// Applies the migrations embedded from `migrations/`.
///
/// # Errors
///
/// Returns `PersistenceError::Database` if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), PersistenceError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| PersistenceError::database(format!("Failed to run migrations: {}", e)))
}
