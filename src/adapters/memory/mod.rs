//! In-memory adapters for tests and database-free local runs.

mod conversation_log;
mod profile_store;

pub use conversation_log::InMemoryConversationLog;
pub use profile_store::InMemoryProfileStore;
