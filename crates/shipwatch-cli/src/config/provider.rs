//! Collaborator wiring.

use anyhow::Context;
use shipwatch_handler::{HandlerRegistry, MonitoringConfigurator};
use shipwatch_render::JsonnetRenderer;
use shipwatch_reqwest::{ConfigurationServiceClient, ReqwestClient};

use super::Cli;

/// Creates the event handlers from CLI configuration.
///
/// One HTTP client is shared by the Grafana and configuration-service
/// providers.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the
/// configuration-service URL is invalid.
pub fn create_registry(cli: &Cli) -> anyhow::Result<HandlerRegistry> {
    let client = ReqwestClient::new(cli.http.clone()).context("failed to create HTTP client")?;

    let shipyard = ConfigurationServiceClient::new(client.clone(), &cli.configuration_service)
        .context("invalid configuration service URL")?
        .into_service();
    let grafana = client.into_grafana_service();
    let renderer = JsonnetRenderer::new(cli.jsonnet.clone()).into_service();

    let configurator =
        MonitoringConfigurator::new(cli.monitoring.clone(), shipyard, grafana, renderer);

    Ok(HandlerRegistry::with_defaults(configurator))
}
