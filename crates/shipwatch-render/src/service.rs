//! Render service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::{DashboardDocument, DashboardRenderer, RenderRequest, Result, TRACING_TARGET};

/// Render service wrapper with observability.
///
/// Adds structured logging to any [`DashboardRenderer`].
#[derive(Clone)]
pub struct RenderService {
    inner: Arc<dyn DashboardRenderer>,
}

impl fmt::Debug for RenderService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderService").finish_non_exhaustive()
    }
}

impl RenderService {
    /// Creates a new render service wrapper.
    pub fn new<R>(renderer: R) -> Self
    where
        R: DashboardRenderer + 'static,
    {
        Self {
            inner: Arc::new(renderer),
        }
    }

    /// Creates a service from an already shared renderer.
    pub fn from_arc(renderer: Arc<dyn DashboardRenderer>) -> Self {
        Self { inner: renderer }
    }

    /// Renders the dashboard described by `request`.
    pub async fn render(&self, request: &RenderRequest) -> Result<DashboardDocument> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            project = %request.project,
            service = %request.service,
            stages = %request.stages,
            "Rendering dashboard"
        );

        let result = self.inner.render(request).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(document) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    project = %request.project,
                    service = %request.service,
                    title = document.title().unwrap_or_default(),
                    elapsed_ms = elapsed.as_millis(),
                    "Dashboard rendered"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    project = %request.project,
                    service = %request.service,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Dashboard rendering failed"
                );
            }
        }

        result
    }
}
