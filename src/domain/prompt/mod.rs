//! Prompt module - renders the system instruction sent to the AI backend.

mod builder;

pub use builder::build_system_prompt;
