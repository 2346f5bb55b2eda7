#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod endpoint;
mod service;

pub mod request;
pub mod response;

pub use endpoint::GrafanaEndpoint;
pub use request::{DashboardUpsert, DataSourceSpec};
pub use response::GrafanaResponse;
pub use service::GrafanaService;
pub use shipwatch_core::{DashboardDocument, Error, ErrorKind, Result};

/// Tracing target for Grafana operations.
pub const TRACING_TARGET: &str = "shipwatch_grafana";

/// Transport for the Grafana HTTP API.
///
/// Implementations return `Ok` whenever a response was received, including
/// non-2xx statuses, and reserve `Err` for failures to complete the exchange.
#[async_trait::async_trait]
pub trait GrafanaProvider: Send + Sync {
    /// Registers a data source.
    async fn create_datasource(
        &self,
        endpoint: &GrafanaEndpoint,
        spec: &DataSourceSpec,
    ) -> Result<GrafanaResponse>;

    /// Creates or overwrites a dashboard.
    async fn upsert_dashboard(
        &self,
        endpoint: &GrafanaEndpoint,
        upsert: &DashboardUpsert,
    ) -> Result<GrafanaResponse>;
}
