//! Mock dashboard renderer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Map, Value};
use shipwatch_core::{DashboardDocument, Error, Result};
use shipwatch_render::{DashboardRenderer, RenderRequest};

use super::lock;

/// Mock dashboard renderer.
///
/// Returns a document titled `{project}-{service}` unless a fixed document
/// is configured, or fails every call.
#[derive(Debug, Clone, Default)]
pub struct MockRenderer {
    document: Option<DashboardDocument>,
    delay: Option<Duration>,
    failing: bool,
    requests: Arc<Mutex<Vec<RenderRequest>>>,
}

impl MockRenderer {
    /// Creates a renderer that succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `document` for every request.
    #[must_use]
    pub fn with_document(mut self, document: DashboardDocument) -> Self {
        self.document = Some(document);
        self
    }

    /// Sleeps for `delay` before answering each request.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fails every call with a render error.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Returns the requests received so far.
    pub fn requests(&self) -> Vec<RenderRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait::async_trait]
impl DashboardRenderer for MockRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<DashboardDocument> {
        lock(&self.requests).push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing {
            return Err(Error::render().with_message("jsonnet exited with exit status: 1"));
        }

        if let Some(document) = &self.document {
            return Ok(document.clone());
        }

        let mut fields = Map::new();
        fields.insert(
            "title".to_owned(),
            Value::String(format!("{}-{}", request.project, request.service)),
        );
        Ok(DashboardDocument::new(fields))
    }
}
