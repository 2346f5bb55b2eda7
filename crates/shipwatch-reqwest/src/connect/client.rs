//! Reqwest-based HTTP client.

use std::sync::Arc;

use reqwest::Client;
use shipwatch_grafana::GrafanaService;

use super::ReqwestConfig;
use crate::error::Result;

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "shipwatch_reqwest::client";

/// Inner client that holds the HTTP client and configuration.
struct ReqwestClientInner {
    http: Client,
    config: ReqwestConfig,
}

/// Reqwest-based HTTP client shared by all outbound calls.
///
/// Implements [`GrafanaProvider`](shipwatch_grafana::GrafanaProvider) and
/// backs [`ConfigurationServiceClient`](crate::ConfigurationServiceClient).
///
/// # Examples
///
/// ```rust,ignore
/// use shipwatch_grafana::{DataSourceSpec, GrafanaEndpoint};
/// use shipwatch_reqwest::{ReqwestClient, ReqwestConfig};
///
/// let client = ReqwestClient::new(ReqwestConfig::default())?;
/// let endpoint = GrafanaEndpoint::new("http://grafana:3000", token)?;
/// let spec = DataSourceSpec::prometheus("http://prometheus:9090");
/// let response = client.create_datasource(&endpoint, &spec).await?;
/// ```
#[derive(Clone)]
pub struct ReqwestClient {
    inner: Arc<ReqwestClientInner>,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestClient {
    /// Creates a new reqwest client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ReqwestConfig) -> Result<Self> {
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            timeout_ms = timeout.map(|timeout| timeout.as_millis()),
            user_agent = %user_agent,
            "Creating reqwest client"
        );

        let mut builder = Client::builder().user_agent(&user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let inner = ReqwestClientInner { http, config };
        let client = Self {
            inner: Arc::new(inner),
        };

        tracing::info!(
            target: TRACING_TARGET,
            "Reqwest client created successfully"
        );

        Ok(client)
    }

    /// Gets the underlying HTTP client.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Converts this client into a [`GrafanaService`] for use with dependency injection.
    pub fn into_grafana_service(self) -> GrafanaService {
        GrafanaService::new(self)
    }
}
