//! HTTP server startup and lifecycle management.

mod error;
mod http_server;
mod shutdown;

use axum::Router;
pub use error::{ServerError, ServerResult as Result};
use http_server::serve_http;
use shutdown::shutdown_signal;

use crate::config::ServerConfig;

/// Tracing target for server startup events.
pub const TRACING_TARGET_STARTUP: &str = crate::TRACING_TARGET_SERVER_STARTUP;

/// Tracing target for server shutdown events.
pub const TRACING_TARGET_SHUTDOWN: &str = crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// Starts the server and runs it until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the address cannot be
/// bound, or the server fails while running.
pub async fn serve(app: Router, config: ServerConfig) -> Result<()> {
    serve_http(app, config).await
}
