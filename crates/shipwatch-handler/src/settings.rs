//! Monitoring settings.

use std::fmt;

#[cfg(feature = "config")]
use clap::Args;
use serde::Deserialize;
use shipwatch_grafana::GrafanaEndpoint;

use crate::{Error, Result};

/// Endpoints and credentials used to configure monitoring.
///
/// Built once at startup and shared read-only. All values are optional at
/// parse time; the Grafana URL and token are checked each time monitoring
/// is configured, and an empty value counts as unset.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct MonitoringSettings {
    /// Base URL of the Grafana instance
    #[cfg_attr(feature = "config", arg(long = "grafana-url", env = "GRAFANA_URL"))]
    #[serde(default)]
    pub grafana_url: Option<String>,

    /// Grafana API token sent as a bearer token
    #[cfg_attr(
        feature = "config",
        arg(long = "grafana-token", env = "GRAFANA_TOKEN", hide_env_values = true)
    )]
    #[serde(default)]
    pub grafana_token: Option<String>,

    /// Prometheus URL registered as a Grafana data source
    #[cfg_attr(feature = "config", arg(long = "prometheus-url", env = "PROMETHEUS_URL"))]
    #[serde(default)]
    pub prometheus_url: Option<String>,
}

impl fmt::Debug for MonitoringSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitoringSettings")
            .field("grafana_url", &self.grafana_url)
            .field(
                "grafana_token",
                &self.grafana_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("prometheus_url", &self.prometheus_url)
            .finish()
    }
}

impl MonitoringSettings {
    /// Creates empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Grafana base URL.
    #[must_use]
    pub fn with_grafana_url(mut self, url: impl Into<String>) -> Self {
        self.grafana_url = Some(url.into());
        self
    }

    /// Set the Grafana API token.
    #[must_use]
    pub fn with_grafana_token(mut self, token: impl Into<String>) -> Self {
        self.grafana_token = Some(token.into());
        self
    }

    /// Set the Prometheus URL.
    #[must_use]
    pub fn with_prometheus_url(mut self, url: impl Into<String>) -> Self {
        self.prometheus_url = Some(url.into());
        self
    }

    /// Returns the Prometheus URL, if set.
    pub fn prometheus_url(&self) -> Option<&str> {
        non_empty(&self.prometheus_url)
    }

    /// Returns whether both required Grafana settings are present.
    pub fn has_grafana(&self) -> bool {
        non_empty(&self.grafana_url).is_some() && non_empty(&self.grafana_token).is_some()
    }

    /// Builds the Grafana endpoint.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL or token is unset, or if the
    /// URL is not a valid http(s) URL.
    pub fn grafana_endpoint(&self) -> Result<GrafanaEndpoint> {
        let url = non_empty(&self.grafana_url)
            .ok_or_else(|| Error::configuration().with_message("Grafana endpoint not set"))?;
        let token = non_empty(&self.grafana_token)
            .ok_or_else(|| Error::configuration().with_message("Grafana API token not set"))?;

        GrafanaEndpoint::new(url, token)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
