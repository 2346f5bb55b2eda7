//! Event intake.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::Serialize;
use shipwatch_core::Error;
use shipwatch_event::Event;
use shipwatch_handler::HandlerRegistry;

use super::{ErrorResponse, Result, TRACING_TARGET};

/// Body returned for a handled event.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Accepted {
    pub status: &'static str,
}

/// Decodes one CloudEvents envelope and dispatches it.
///
/// The body is decoded by hand so that structured (`application/json`) and
/// CloudEvents (`application/cloudevents+json`) content types are accepted
/// alike. Dispatch runs on its own task, so a client that disconnects early
/// detaches the handler instead of cancelling it.
pub async fn receive_event(
    State(registry): State<Arc<HandlerRegistry>>,
    body: Bytes,
) -> Result<Json<Accepted>> {
    let event: Event = serde_json::from_slice(&body).map_err(|err| {
        tracing::warn!(
            target: TRACING_TARGET,
            error = %err,
            body_len = body.len(),
            "Rejected malformed event"
        );
        ErrorResponse::malformed_event(format!("malformed event: {err}"))
    })?;

    tracing::info!(
        target: TRACING_TARGET,
        event_id = %event.id,
        event_type = %event.event_type,
        "Received event"
    );

    let event_id = event.id.clone();
    let dispatch = tokio::spawn(async move { registry.dispatch(&event).await });

    dispatch.await.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET,
            event_id = %event_id,
            error = %err,
            "Event handler task failed"
        );
        Error::internal_error()
            .with_message("event handler task failed")
            .with_source(err)
    })??;

    Ok(Json(Accepted { status: "ok" }))
}
