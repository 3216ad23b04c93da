//! Webhook HTTP adapter - the messaging provider's entry point.

mod dto;
mod handlers;
mod routes;

pub use dto::{HealthResponse, InboundMessageForm};
pub use handlers::WebhookAppState;
pub use routes::webhook_router;
