//! Grafana request bodies.

use serde::{Deserialize, Serialize};

use crate::DashboardDocument;

/// Body of `POST /api/datasources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceSpec {
    /// Display name of the data source.
    pub name: String,
    /// Grafana plugin type.
    #[serde(rename = "type")]
    pub source_type: String,
    /// URL Grafana uses to reach the backend.
    pub url: String,
    /// Access mode (`proxy` or `direct`).
    pub access: String,
}

impl DataSourceSpec {
    /// A Prometheus data source accessed through the Grafana proxy.
    pub fn prometheus(url: impl Into<String>) -> Self {
        Self {
            name: "Prometheus".to_owned(),
            source_type: "prometheus".to_owned(),
            url: url.into(),
            access: "proxy".to_owned(),
        }
    }
}

/// Body of `POST /api/dashboards/db`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardUpsert {
    pub dashboard: DashboardDocument,
    pub overwrite: bool,
}

impl DashboardUpsert {
    /// Wraps a document for create-or-overwrite.
    pub fn new(dashboard: DashboardDocument) -> Self {
        Self {
            dashboard,
            overwrite: true,
        }
    }
}
