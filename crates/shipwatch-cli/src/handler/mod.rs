//! HTTP intake for keptn events.

mod error;
mod events;
mod health;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
pub use error::{ErrorResponse, Result};
use shipwatch_handler::HandlerRegistry;
use tower_http::trace::TraceLayer;

/// Tracing target for inbound HTTP requests.
pub const TRACING_TARGET: &str = "shipwatch_cli::handler";

/// Returns a router with all routes, serving events through `registry`.
pub fn routes(registry: HandlerRegistry) -> Router {
    Router::new()
        .route("/", post(events::receive_event))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(registry))
}
