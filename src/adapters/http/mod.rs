//! HTTP adapters - axum routes exposed to the messaging provider.

pub mod webhook;

pub use webhook::{webhook_router, HealthResponse, WebhookAppState};

use axum::Router;
use tower_http::trace::TraceLayer;

/// Builds the application router with request tracing.
pub fn app_router(state: WebhookAppState) -> Router {
    webhook_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
