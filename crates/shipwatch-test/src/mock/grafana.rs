//! Mock Grafana provider.

use std::sync::{Arc, Mutex};

use shipwatch_core::{Error, ErrorKind, Result};
use shipwatch_grafana::{
    DashboardUpsert, DataSourceSpec, GrafanaEndpoint, GrafanaProvider, GrafanaResponse,
};
use url::Url;

use super::lock;

/// A call received by [`MockGrafanaProvider`].
#[derive(Debug, Clone, PartialEq)]
pub enum GrafanaCall {
    /// `POST /api/datasources`
    CreateDatasource {
        url: Url,
        authorization: String,
        spec: DataSourceSpec,
    },
    /// `POST /api/dashboards/db`
    UpsertDashboard {
        url: Url,
        authorization: String,
        upsert: DashboardUpsert,
    },
}

/// Mock Grafana provider.
///
/// Records every call; answers `200` unless told to fail.
#[derive(Debug, Clone)]
pub struct MockGrafanaProvider {
    calls: Arc<Mutex<Vec<GrafanaCall>>>,
    datasource_error: Option<ErrorKind>,
    dashboard_error: Option<ErrorKind>,
    status_code: u16,
}

impl Default for MockGrafanaProvider {
    fn default() -> Self {
        Self {
            calls: Arc::default(),
            datasource_error: None,
            dashboard_error: None,
            status_code: 200,
        }
    }
}

impl MockGrafanaProvider {
    /// Creates a mock that accepts every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails data-source requests with an error of `kind`.
    #[must_use]
    pub fn with_datasource_error(mut self, kind: ErrorKind) -> Self {
        self.datasource_error = Some(kind);
        self
    }

    /// Fails dashboard requests with an error of `kind`.
    #[must_use]
    pub fn with_dashboard_error(mut self, kind: ErrorKind) -> Self {
        self.dashboard_error = Some(kind);
        self
    }

    /// Answers successful calls with `status_code`.
    #[must_use]
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Returns all recorded calls in order.
    pub fn calls(&self) -> Vec<GrafanaCall> {
        lock(&self.calls).clone()
    }

    /// Returns the number of recorded calls.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns the bodies of recorded data-source calls.
    pub fn datasource_requests(&self) -> Vec<DataSourceSpec> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                GrafanaCall::CreateDatasource { spec, .. } => Some(spec.clone()),
                GrafanaCall::UpsertDashboard { .. } => None,
            })
            .collect()
    }

    /// Returns the bodies of recorded dashboard calls.
    pub fn dashboard_requests(&self) -> Vec<DashboardUpsert> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                GrafanaCall::UpsertDashboard { upsert, .. } => Some(upsert.clone()),
                GrafanaCall::CreateDatasource { .. } => None,
            })
            .collect()
    }

    fn respond(&self, failure: Option<ErrorKind>) -> Result<GrafanaResponse> {
        match failure {
            Some(kind) => Err(Error::new(kind).with_message("Connection failed")),
            None => Ok(GrafanaResponse::new(self.status_code)),
        }
    }
}

#[async_trait::async_trait]
impl GrafanaProvider for MockGrafanaProvider {
    async fn create_datasource(
        &self,
        endpoint: &GrafanaEndpoint,
        spec: &DataSourceSpec,
    ) -> Result<GrafanaResponse> {
        lock(&self.calls).push(GrafanaCall::CreateDatasource {
            url: endpoint.datasources_url(),
            authorization: endpoint.bearer(),
            spec: spec.clone(),
        });

        self.respond(self.datasource_error)
    }

    async fn upsert_dashboard(
        &self,
        endpoint: &GrafanaEndpoint,
        upsert: &DashboardUpsert,
    ) -> Result<GrafanaResponse> {
        lock(&self.calls).push(GrafanaCall::UpsertDashboard {
            url: endpoint.dashboards_url(),
            authorization: endpoint.bearer(),
            upsert: upsert.clone(),
        });

        self.respond(self.dashboard_error)
    }
}
