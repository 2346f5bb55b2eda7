//! Grafana service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    DashboardUpsert, DataSourceSpec, GrafanaEndpoint, GrafanaProvider, GrafanaResponse, Result,
    TRACING_TARGET,
};

/// Grafana service wrapper with observability.
///
/// Adds structured logging to any [`GrafanaProvider`]. The provider is
/// wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct GrafanaService {
    inner: Arc<dyn GrafanaProvider>,
}

impl fmt::Debug for GrafanaService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrafanaService").finish_non_exhaustive()
    }
}

impl GrafanaService {
    /// Creates a new Grafana service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: GrafanaProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Creates a service from an already shared provider.
    pub fn from_arc(provider: Arc<dyn GrafanaProvider>) -> Self {
        Self { inner: provider }
    }

    /// Registers a data source.
    pub async fn create_datasource(
        &self,
        endpoint: &GrafanaEndpoint,
        spec: &DataSourceSpec,
    ) -> Result<GrafanaResponse> {
        let started_at = Instant::now();
        let url = endpoint.datasources_url();

        tracing::debug!(
            target: TRACING_TARGET,
            url = %url,
            datasource = %spec.name,
            source_type = %spec.source_type,
            "Creating data source"
        );

        let result = self.inner.create_datasource(endpoint, spec).await;
        log_outcome("Data source", url.as_str(), &result, started_at);
        result
    }

    /// Creates or overwrites a dashboard.
    pub async fn upsert_dashboard(
        &self,
        endpoint: &GrafanaEndpoint,
        upsert: &DashboardUpsert,
    ) -> Result<GrafanaResponse> {
        let started_at = Instant::now();
        let url = endpoint.dashboards_url();

        tracing::debug!(
            target: TRACING_TARGET,
            url = %url,
            title = upsert.dashboard.title().unwrap_or_default(),
            overwrite = upsert.overwrite,
            "Upserting dashboard"
        );

        let result = self.inner.upsert_dashboard(endpoint, upsert).await;
        log_outcome("Dashboard", url.as_str(), &result, started_at);
        result
    }
}

fn log_outcome(resource: &str, url: &str, result: &Result<GrafanaResponse>, started_at: Instant) {
    let elapsed = started_at.elapsed();

    match result {
        Ok(response) if response.is_success() => {
            tracing::debug!(
                target: TRACING_TARGET,
                url = %url,
                status_code = response.status_code,
                elapsed_ms = elapsed.as_millis(),
                "{resource} request completed"
            );
        }
        Ok(response) => {
            tracing::warn!(
                target: TRACING_TARGET,
                url = %url,
                status_code = response.status_code,
                body = response.body.as_deref().unwrap_or_default(),
                elapsed_ms = elapsed.as_millis(),
                "{resource} request rejected"
            );
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET,
                url = %url,
                error = %error,
                elapsed_ms = elapsed.as_millis(),
                "{resource} request error"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{DashboardDocument, Error, ErrorKind};

    #[derive(Default)]
    struct Recorder {
        urls: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl GrafanaProvider for Recorder {
        async fn create_datasource(
            &self,
            endpoint: &GrafanaEndpoint,
            _spec: &DataSourceSpec,
        ) -> Result<GrafanaResponse> {
            self.urls
                .lock()
                .unwrap()
                .push(endpoint.datasources_url().to_string());
            Err(Error::network_error().with_message("Connection failed"))
        }

        async fn upsert_dashboard(
            &self,
            endpoint: &GrafanaEndpoint,
            _upsert: &DashboardUpsert,
        ) -> Result<GrafanaResponse> {
            self.urls
                .lock()
                .unwrap()
                .push(endpoint.dashboards_url().to_string());
            Ok(GrafanaResponse::new(200))
        }
    }

    #[tokio::test]
    async fn forwards_to_provider() {
        let recorder = Arc::new(Recorder::default());
        let service = GrafanaService::from_arc(recorder.clone());
        let endpoint = GrafanaEndpoint::new("http://grafana:3000", "token").unwrap();

        let error = service
            .create_datasource(&endpoint, &DataSourceSpec::prometheus("http://prometheus"))
            .await
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::NetworkError);

        let response = service
            .upsert_dashboard(&endpoint, &DashboardUpsert::new(DashboardDocument::default()))
            .await
            .unwrap();
        assert!(response.is_success());

        assert_eq!(
            *recorder.urls.lock().unwrap(),
            vec![
                "http://grafana:3000/api/datasources".to_owned(),
                "http://grafana:3000/api/dashboards/db".to_owned(),
            ]
        );
    }
}
