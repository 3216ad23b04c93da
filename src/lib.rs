//! Yquando - WhatsApp farming assistant
//!
//! Farmers register their farm and crops over WhatsApp and then ask
//! questions that are answered by a language model primed with their
//! farm profile.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
