//! Grafana monitoring configuration.

use std::fmt;
use std::sync::Arc;

use shipwatch_event::{MonitoringConfigRequest, MonitoringProvider};
use shipwatch_grafana::{DashboardUpsert, DataSourceSpec, GrafanaEndpoint, GrafanaService};
use shipwatch_render::{RenderRequest, RenderService, StageList};
use shipwatch_shipyard::{Shipyard, ShipyardService};

use crate::{ErrorKind, MonitoringSettings, Result, TRACING_TARGET_MONITORING};

/// Provisions Grafana for a project service.
///
/// Runs strictly in sequence:
///
/// 1. Resolve the Grafana endpoint from [`MonitoringSettings`].
/// 2. Fetch the project's shipyard.
/// 3. Register Prometheus as a data source, when a Prometheus URL is set and
///    the request is for Prometheus.
/// 4. Render the dashboard for the shipyard's stages (Prometheus only).
/// 5. Upsert the dashboard.
///
/// Steps 1, 2 and 4 fail the whole operation. Failures in steps 3 and 5 are
/// logged and the operation still succeeds.
#[derive(Clone)]
pub struct MonitoringConfigurator {
    settings: Arc<MonitoringSettings>,
    shipyard: ShipyardService,
    grafana: GrafanaService,
    renderer: RenderService,
}

impl fmt::Debug for MonitoringConfigurator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitoringConfigurator")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl MonitoringConfigurator {
    /// Creates a configurator from its collaborators.
    pub fn new(
        settings: MonitoringSettings,
        shipyard: ShipyardService,
        grafana: GrafanaService,
        renderer: RenderService,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            shipyard,
            grafana,
            renderer,
        }
    }

    /// Returns the settings in use.
    pub fn settings(&self) -> &MonitoringSettings {
        &self.settings
    }

    /// Configures monitoring for the service named in `request`.
    ///
    /// `event_id` is used for log correlation only.
    pub async fn configure(&self, event_id: &str, request: &MonitoringConfigRequest) -> Result<()> {
        tracing::info!(
            target: TRACING_TARGET_MONITORING,
            event_id = %event_id,
            provider = %request.provider(),
            project = %request.project(),
            service = %request.service(),
            "Configuring monitoring"
        );

        let endpoint = self.settings.grafana_endpoint()?;
        let shipyard = self.shipyard.fetch(request.project()).await?;
        let is_prometheus = *request.provider() == MonitoringProvider::Prometheus;

        match self.settings.prometheus_url() {
            None => {
                tracing::info!(
                    target: TRACING_TARGET_MONITORING,
                    event_id = %event_id,
                    "PROMETHEUS_URL not set, therefore not creating datasource in Grafana"
                );
            }
            Some(prometheus_url) if is_prometheus => {
                self.create_datasource(event_id, &endpoint, prometheus_url)
                    .await;
            }
            Some(_) => {}
        }

        if !is_prometheus {
            tracing::info!(
                target: TRACING_TARGET_MONITORING,
                event_id = %event_id,
                provider = %request.provider(),
                "Monitoring type {} not supported",
                request.provider()
            );
            return Ok(());
        }

        let render_request = render_request(&shipyard, request)?;
        let dashboard = self.renderer.render(&render_request).await?;

        let upserted = self
            .upsert_dashboard(event_id, &endpoint, DashboardUpsert::new(dashboard))
            .await;

        if upserted {
            tracing::info!(
                target: TRACING_TARGET_MONITORING,
                event_id = %event_id,
                project = %request.project(),
                service = %request.service(),
                "Monitoring configured"
            );
        } else {
            tracing::warn!(
                target: TRACING_TARGET_MONITORING,
                event_id = %event_id,
                project = %request.project(),
                service = %request.service(),
                "Monitoring partially configured, dashboard was not created"
            );
        }

        Ok(())
    }

    async fn create_datasource(&self, event_id: &str, endpoint: &GrafanaEndpoint, url: &str) {
        let spec = DataSourceSpec::prometheus(url);

        if let Err(error) = self.grafana.create_datasource(endpoint, &spec).await {
            tracing::warn!(
                target: TRACING_TARGET_MONITORING,
                event_id = %event_id,
                error = %error,
                "Could not create Prometheus data source in Grafana"
            );
        }
    }

    /// Returns whether Grafana accepted the dashboard.
    async fn upsert_dashboard(
        &self,
        event_id: &str,
        endpoint: &GrafanaEndpoint,
        upsert: DashboardUpsert,
    ) -> bool {
        match self.grafana.upsert_dashboard(endpoint, &upsert).await {
            Ok(response) => response.is_success(),
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_MONITORING,
                    event_id = %event_id,
                    error = %error,
                    "Could not create dashboard in Grafana"
                );
                false
            }
        }
    }
}

fn render_request(shipyard: &Shipyard, request: &MonitoringConfigRequest) -> Result<RenderRequest> {
    let stages = StageList::new(shipyard.stage_names()).map_err(|err| {
        let message = format!(
            "shipyard of project {} cannot be rendered: {}",
            request.project(),
            err.message.as_deref().unwrap_or_default()
        );
        err.with_kind(ErrorKind::Render).with_message(message)
    })?;

    Ok(RenderRequest::new(
        stages,
        request.project(),
        request.service(),
    ))
}

#[cfg(test)]
mod tests {
    use shipwatch_grafana::GrafanaProvider;
    use shipwatch_render::DashboardRenderer;
    use shipwatch_shipyard::ShipyardProvider;
    use shipwatch_test::{GrafanaCall, MockGrafanaProvider, MockRenderer, MockShipyardProvider};
    use tracing_test::traced_test;

    use super::*;

    const PROMETHEUS_URL: &str = "http://prometheus-service.monitoring.svc.cluster.local:8080";

    fn settings() -> MonitoringSettings {
        MonitoringSettings::new()
            .with_grafana_url("http://grafana.monitoring:3000")
            .with_grafana_token("glsa_token")
            .with_prometheus_url(PROMETHEUS_URL)
    }

    fn configurator<S, G, R>(
        settings: MonitoringSettings,
        shipyard: S,
        grafana: G,
        renderer: R,
    ) -> MonitoringConfigurator
    where
        S: ShipyardProvider + 'static,
        G: GrafanaProvider + 'static,
        R: DashboardRenderer + 'static,
    {
        MonitoringConfigurator::new(
            settings,
            ShipyardService::new(shipyard),
            GrafanaService::new(grafana),
            RenderService::new(renderer),
        )
    }

    fn sockshop() -> MockShipyardProvider {
        MockShipyardProvider::with_stages(["dev", "staging", "production"])
    }

    fn prometheus_request() -> MonitoringConfigRequest {
        MonitoringConfigRequest::new("prometheus", "sockshop", "carts")
    }

    #[tokio::test]
    async fn missing_grafana_url_fails_before_any_call() {
        let shipyard = sockshop();
        let grafana = MockGrafanaProvider::new();
        let renderer = MockRenderer::new();
        let settings = MonitoringSettings::new().with_grafana_token("glsa_token");
        let configurator =
            configurator(settings, shipyard.clone(), grafana.clone(), renderer.clone());

        let error = configurator
            .configure("event-1", &prometheus_request())
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Configuration);
        assert_eq!(error.message.as_deref(), Some("Grafana endpoint not set"));
        assert_eq!(grafana.call_count(), 0);
        assert!(shipyard.requested_projects().is_empty());
        assert!(renderer.requests().is_empty());
    }

    #[tokio::test]
    async fn missing_grafana_token_fails_before_any_call() {
        let (shipyard, grafana) = (sockshop(), MockGrafanaProvider::new());
        let settings = MonitoringSettings::new()
            .with_grafana_url("http://grafana.monitoring:3000")
            .with_prometheus_url(PROMETHEUS_URL);
        let configurator =
            configurator(settings, shipyard.clone(), grafana.clone(), MockRenderer::new());

        let error = configurator
            .configure("event-1", &prometheus_request())
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Configuration);
        assert_eq!(error.message.as_deref(), Some("Grafana API token not set"));
        assert_eq!(grafana.call_count(), 0);
        assert!(shipyard.requested_projects().is_empty());
    }

    #[tokio::test]
    async fn invalid_grafana_url_is_a_configuration_error() {
        let grafana = MockGrafanaProvider::new();
        let settings = settings().with_grafana_url("grafana.monitoring");
        let configurator =
            configurator(settings, sockshop(), grafana.clone(), MockRenderer::new());

        let error = configurator
            .configure("event-1", &prometheus_request())
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Configuration);
        assert_eq!(grafana.call_count(), 0);
    }

    #[tokio::test]
    async fn provisions_datasource_and_dashboard_for_prometheus() {
        let shipyard = sockshop();
        let grafana = MockGrafanaProvider::new();
        let renderer = MockRenderer::new();
        let configurator =
            configurator(settings(), shipyard.clone(), grafana.clone(), renderer.clone());

        configurator
            .configure("event-1", &prometheus_request())
            .await
            .unwrap();

        assert_eq!(shipyard.requested_projects(), vec!["sockshop".to_owned()]);

        let requests = renderer.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].stages.to_string(),
            r#"["dev", "staging", "production"]"#
        );
        assert_eq!(requests[0].project, "sockshop");
        assert_eq!(requests[0].service, "carts");

        let calls = grafana.calls();
        assert_eq!(calls.len(), 2);
        match &calls[0] {
            GrafanaCall::CreateDatasource {
                url,
                authorization,
                spec,
            } => {
                assert_eq!(url.as_str(), "http://grafana.monitoring:3000/api/datasources");
                assert_eq!(authorization, "Bearer glsa_token");
                assert_eq!(spec, &DataSourceSpec::prometheus(PROMETHEUS_URL));
            }
            other => panic!("expected a data source call, got {other:?}"),
        }
        match &calls[1] {
            GrafanaCall::UpsertDashboard { url, upsert, .. } => {
                assert_eq!(url.as_str(), "http://grafana.monitoring:3000/api/dashboards/db");
                assert!(upsert.overwrite);
                assert_eq!(upsert.dashboard.title(), Some("sockshop-carts"));
            }
            other => panic!("expected a dashboard call, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn without_prometheus_url_only_dashboard_is_created() {
        let (grafana, renderer) = (MockGrafanaProvider::new(), MockRenderer::new());
        let settings = MonitoringSettings::new()
            .with_grafana_url("http://grafana.monitoring:3000")
            .with_grafana_token("glsa_token");
        let configurator = configurator(settings, sockshop(), grafana.clone(), renderer.clone());

        configurator
            .configure("event-1", &prometheus_request())
            .await
            .unwrap();

        assert!(grafana.datasource_requests().is_empty());
        assert_eq!(renderer.requests().len(), 1);
        assert_eq!(grafana.dashboard_requests().len(), 1);
    }

    #[tokio::test]
    async fn unsupported_provider_is_a_successful_no_op() {
        let shipyard = sockshop();
        let grafana = MockGrafanaProvider::new();
        let renderer = MockRenderer::new();
        let configurator =
            configurator(settings(), shipyard.clone(), grafana.clone(), renderer.clone());

        configurator
            .configure("event-1", &MonitoringConfigRequest::new("datadog", "sockshop", "carts"))
            .await
            .unwrap();

        assert_eq!(shipyard.requested_projects().len(), 1);
        assert_eq!(grafana.call_count(), 0);
        assert!(renderer.requests().is_empty());
    }

    #[tokio::test]
    async fn provider_match_is_case_sensitive() {
        let grafana = MockGrafanaProvider::new();
        let configurator =
            configurator(settings(), sockshop(), grafana.clone(), MockRenderer::new());

        configurator
            .configure(
                "event-1",
                &MonitoringConfigRequest::new("Prometheus", "sockshop", "carts"),
            )
            .await
            .unwrap();

        assert_eq!(grafana.call_count(), 0);
    }

    #[tokio::test]
    async fn datasource_failure_does_not_stop_dashboard() {
        let grafana = MockGrafanaProvider::new().with_datasource_error(ErrorKind::NetworkError);
        let configurator =
            configurator(settings(), sockshop(), grafana.clone(), MockRenderer::new());

        configurator
            .configure("event-1", &prometheus_request())
            .await
            .unwrap();

        assert_eq!(grafana.datasource_requests().len(), 1);
        assert_eq!(grafana.dashboard_requests().len(), 1);
    }

    #[tokio::test]
    #[traced_test]
    async fn dashboard_failure_is_swallowed() {
        let grafana = MockGrafanaProvider::new().with_dashboard_error(ErrorKind::Timeout);
        let configurator =
            configurator(settings(), sockshop(), grafana.clone(), MockRenderer::new());

        let result = configurator.configure("event-1", &prometheus_request()).await;

        assert!(result.is_ok());
        assert_eq!(grafana.dashboard_requests().len(), 1);
        assert!(logs_contain("dashboard was not created"));
        assert!(!logs_contain("Monitoring configured"));
    }

    #[tokio::test]
    #[traced_test]
    async fn successful_run_logs_completion() {
        let configurator = configurator(
            settings(),
            sockshop(),
            MockGrafanaProvider::new(),
            MockRenderer::new(),
        );

        configurator
            .configure("event-1", &prometheus_request())
            .await
            .unwrap();

        assert!(logs_contain("Monitoring configured"));
        assert!(!logs_contain("dashboard was not created"));
    }

    #[tokio::test]
    async fn rejected_requests_are_not_errors() {
        let grafana = MockGrafanaProvider::new().with_status_code(500);
        let configurator =
            configurator(settings(), sockshop(), grafana.clone(), MockRenderer::new());

        configurator
            .configure("event-1", &prometheus_request())
            .await
            .unwrap();

        assert_eq!(grafana.call_count(), 2);
    }

    #[tokio::test]
    async fn render_failure_aborts_before_dashboard() {
        let grafana = MockGrafanaProvider::new();
        let configurator =
            configurator(settings(), sockshop(), grafana.clone(), MockRenderer::failing());

        let error = configurator
            .configure("event-1", &prometheus_request())
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Render);
        assert_eq!(grafana.datasource_requests().len(), 1);
        assert!(grafana.dashboard_requests().is_empty());
    }

    #[tokio::test]
    async fn shipyard_failure_aborts_before_grafana() {
        let (grafana, renderer) = (MockGrafanaProvider::new(), MockRenderer::new());
        let configurator = configurator(
            settings(),
            MockShipyardProvider::failing(),
            grafana.clone(),
            renderer.clone(),
        );

        let error = configurator
            .configure("event-1", &prometheus_request())
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::ShipyardFetch);
        assert_eq!(grafana.call_count(), 0);
        assert!(renderer.requests().is_empty());
    }

    #[tokio::test]
    async fn unsafe_stage_name_is_a_render_error() {
        let (grafana, renderer) = (MockGrafanaProvider::new(), MockRenderer::new());
        let shipyard = MockShipyardProvider::with_stages(["dev", "prod\"uction"]);
        let configurator = configurator(settings(), shipyard, grafana.clone(), renderer.clone());

        let error = configurator
            .configure("event-1", &prometheus_request())
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Render);
        assert!(renderer.requests().is_empty());
        assert!(grafana.dashboard_requests().is_empty());
    }
}
