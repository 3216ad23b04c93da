//! Conversation module - routing state, fixed replies and log records.

mod record;
pub mod replies;
mod sender_state;

pub use record::{ConversationRecord, NewConversation};
pub use sender_state::SenderState;
