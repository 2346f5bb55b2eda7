#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod request;
mod service;
mod stages;

pub mod jsonnet;

pub use jsonnet::{JsonnetConfig, JsonnetRenderer};
pub use request::RenderRequest;
pub use service::RenderService;
pub use shipwatch_core::{DashboardDocument, Error, ErrorKind, Result};
pub use stages::StageList;

/// Tracing target for dashboard rendering.
pub const TRACING_TARGET: &str = "shipwatch_render";

/// Produces a dashboard document for a project service.
///
/// Failures must be reported as [`ErrorKind::Render`].
#[async_trait::async_trait]
pub trait DashboardRenderer: Send + Sync {
    /// Renders the dashboard described by `request`.
    async fn render(&self, request: &RenderRequest) -> Result<DashboardDocument>;
}
