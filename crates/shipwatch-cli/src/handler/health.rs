//! Liveness probe.

use axum::http::StatusCode;

/// Replies `200 OK` while the process is serving requests.
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
