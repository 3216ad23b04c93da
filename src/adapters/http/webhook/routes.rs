//! Route configuration for the webhook endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{health, receive_message, WebhookAppState};

/// Creates the webhook router.
///
/// Routes:
/// - `POST /message` - Inbound message webhook (form-encoded `Body`, `From`)
/// - `GET /health` - Liveness check
pub fn webhook_router() -> Router<WebhookAppState> {
    Router::new()
        .route("/message", post(receive_message))
        .route("/health", get(health))
}
