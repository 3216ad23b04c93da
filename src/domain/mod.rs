//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, phone numbers, errors)
//! - `profile` - Registered users, their farm and crops
//! - `registration` - Registration command grammar
//! - `prompt` - System prompt rendering from a profile
//! - `conversation` - Routing state, fixed replies and log records

pub mod conversation;
pub mod foundation;
pub mod profile;
pub mod prompt;
pub mod registration;
