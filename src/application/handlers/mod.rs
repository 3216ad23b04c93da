//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod inbound;

pub use inbound::{AIBackendFailure, HandleInboundMessageHandler, InboundMessageCommand, TurnOutcome};
