#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod resource;
mod service;
mod shipyard;

pub use resource::{ProjectResource, SHIPYARD_RESOURCE};
pub use service::ShipyardService;
pub use shipwatch_core::{Error, ErrorKind, Result};
pub use shipyard::{ApprovalStrategy, Shipyard, Stage};

/// Tracing target for shipyard retrieval.
pub const TRACING_TARGET: &str = "shipwatch_shipyard";

/// Retrieves the pipeline description of a project.
///
/// Implement this trait to plug in a configuration source; failures must be
/// reported as [`ErrorKind::ShipyardFetch`].
#[async_trait::async_trait]
pub trait ShipyardProvider: Send + Sync {
    /// Fetches the current shipyard of `project`.
    async fn fetch_shipyard(&self, project: &str) -> Result<Shipyard>;
}
