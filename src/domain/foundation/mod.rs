//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the phone number value object and the error types
//! that form the vocabulary of the Yquando domain.

mod errors;
mod ids;
mod phone;

pub use errors::{PersistenceError, ValidationError};
pub use ids::{ConversationId, CropId, FarmId, UserId};
pub use phone::PhoneNumber;
