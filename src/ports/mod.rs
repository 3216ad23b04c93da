//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProfileStore` - Registered users with their farm and crops
//! - `ConversationLog` - Insert-only record of answered messages
//! - `AIProvider` - Language model completions
//! - `MessageTransport` - Outbound delivery through the messaging provider

mod ai_provider;
mod conversation_log;
mod message_transport;
mod profile_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
pub use conversation_log::ConversationLog;
pub use message_transport::{MessageTransport, TransportError};
pub use profile_store::ProfileStore;
