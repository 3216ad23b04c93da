//! Inbound message handling.

mod handle_inbound_message;

pub use handle_inbound_message::{
    AIBackendFailure, HandleInboundMessageHandler, InboundMessageCommand, TurnOutcome,
};
