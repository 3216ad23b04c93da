//! HTTP handlers for the webhook endpoints.
//!
//! Business outcomes always answer `200 OK` with a plain-text body; the
//! provider shows that body to the sender.

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::{HandleInboundMessageHandler, InboundMessageCommand};

use super::dto::{HealthResponse, InboundMessageForm};

/// Shared state for the webhook routes.
#[derive(Clone)]
pub struct WebhookAppState {
    pub inbound_handler: Arc<HandleInboundMessageHandler>,
}

impl WebhookAppState {
    pub fn new(inbound_handler: Arc<HandleInboundMessageHandler>) -> Self {
        Self { inbound_handler }
    }
}

/// POST /message - Handle one inbound message.
pub async fn receive_message(
    State(state): State<WebhookAppState>,
    Form(form): Form<InboundMessageForm>,
) -> impl IntoResponse {
    let outcome = state
        .inbound_handler
        .handle(InboundMessageCommand::new(form.body, form.from))
        .await;

    (StatusCode::OK, outcome.webhook_body())
}

/// GET /health - Liveness check.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse::up()))
}
