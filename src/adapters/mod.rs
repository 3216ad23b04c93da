//! Adapters - Implementations of port interfaces.
//!
//! - `postgres` - PostgreSQL profile store and conversation log
//! - `memory` - In-memory stores for tests and local runs
//! - `ai` - OpenAI and mock completion providers
//! - `messaging` - Twilio and mock message transports
//! - `http` - axum webhook routes

pub mod ai;
pub mod http;
pub mod memory;
pub mod messaging;
pub mod postgres;
