//! Configuration-service shipyard provider.

use std::time::Instant;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use shipwatch_core::ErrorKind;
use shipwatch_shipyard::{
    ProjectResource, SHIPYARD_RESOURCE, Shipyard, ShipyardProvider, ShipyardService,
};
use url::Url;

use crate::connect::ReqwestClient;
use crate::error::{Error, Result};

/// Tracing target for configuration-service calls.
const TRACING_TARGET: &str = "shipwatch_reqwest::shipyard";

/// Default configuration-service address inside a keptn installation.
pub const DEFAULT_CONFIGURATION_SERVICE: &str = "http://configuration-service:8080";

/// Location of the keptn configuration service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ConfigurationServiceConfig {
    /// Base URL of the configuration service
    #[cfg_attr(
        feature = "config",
        arg(
            long = "configuration-service",
            env = "CONFIGURATION_SERVICE",
            default_value = DEFAULT_CONFIGURATION_SERVICE
        )
    )]
    #[serde(default = "default_configuration_service")]
    pub configuration_service_url: String,
}

fn default_configuration_service() -> String {
    DEFAULT_CONFIGURATION_SERVICE.to_owned()
}

impl Default for ConfigurationServiceConfig {
    fn default() -> Self {
        Self {
            configuration_service_url: default_configuration_service(),
        }
    }
}

impl ConfigurationServiceConfig {
    /// Creates a configuration pointing at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            configuration_service_url: url.into(),
        }
    }
}

/// Reads project shipyards from the keptn configuration service.
#[derive(Debug, Clone)]
pub struct ConfigurationServiceClient {
    client: ReqwestClient,
    base_url: Url,
}

impl ConfigurationServiceClient {
    /// Creates a client on top of a shared [`ReqwestClient`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL is not a valid base URL.
    pub fn new(client: ReqwestClient, config: &ConfigurationServiceConfig) -> Result<Self> {
        let base_url = Url::parse(&config.configuration_service_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %base_url,
            "Creating configuration service client"
        );

        Ok(Self { client, base_url })
    }

    /// Converts this client into a [`ShipyardService`] for use with dependency injection.
    pub fn into_service(self) -> ShipyardService {
        ShipyardService::new(self)
    }

    /// `{base}/v1/project/{project}/resource/shipyard.yaml`
    pub fn resource_url(&self, project: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Never fails: cannot-be-a-base URLs are rejected in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["v1", "project", project, "resource", SHIPYARD_RESOURCE]);
        }
        url
    }

    async fn get_resource(&self, url: Url) -> Result<ProjectResource> {
        let response = self.client.http().get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait::async_trait]
impl ShipyardProvider for ConfigurationServiceClient {
    async fn fetch_shipyard(&self, project: &str) -> shipwatch_core::Result<Shipyard> {
        let started_at = Instant::now();
        let url = self.resource_url(project);

        tracing::debug!(
            target: TRACING_TARGET,
            project = %project,
            url = %url,
            "Requesting shipyard resource"
        );

        let resource = self.get_resource(url).await.map_err(|err| {
            shipwatch_core::Error::from(err).with_kind(ErrorKind::ShipyardFetch)
        })?;
        let shipyard = resource.to_shipyard()?;

        tracing::debug!(
            target: TRACING_TARGET,
            project = %project,
            stages = shipyard.stages.len(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Shipyard resource decoded"
        );

        Ok(shipyard)
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::json;

    use super::*;
    use crate::ReqwestConfig;
    use crate::testing::{closed_port, serve};

    fn client_for(url: String) -> ConfigurationServiceClient {
        let http = ReqwestClient::new(ReqwestConfig::new(5)).unwrap();
        ConfigurationServiceClient::new(http, &ConfigurationServiceConfig::new(url)).unwrap()
    }

    #[test]
    fn builds_resource_url() {
        let client = client_for(DEFAULT_CONFIGURATION_SERVICE.to_owned());
        assert_eq!(
            client.resource_url("sockshop").as_str(),
            "http://configuration-service:8080/v1/project/sockshop/resource/shipyard.yaml"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let http = ReqwestClient::new(ReqwestConfig::default()).unwrap();
        let config = ConfigurationServiceConfig::new("configuration-service");
        assert!(ConfigurationServiceClient::new(http, &config).is_err());
    }

    #[tokio::test]
    async fn fetches_and_decodes_shipyard() {
        let content = STANDARD.encode(
            "stages:\n  - name: dev\n  - name: staging\n  - name: production\n",
        );
        let router = Router::new().route(
            "/v1/project/sockshop/resource/shipyard.yaml",
            get(move || async move {
                axum::Json(json!({
                    "resourceURI": "shipyard.yaml",
                    "resourceContent": content,
                }))
            }),
        );
        let addr = serve(router).await;

        let shipyard = client_for(format!("http://{addr}"))
            .fetch_shipyard("sockshop")
            .await
            .unwrap();

        assert_eq!(shipyard.stage_names(), vec!["dev", "staging", "production"]);
    }

    #[tokio::test]
    async fn missing_project_is_a_fetch_error() {
        let router = Router::new().route(
            "/v1/project/sockshop/resource/shipyard.yaml",
            get(|| async { StatusCode::NOT_FOUND }),
        );
        let addr = serve(router).await;

        let error = client_for(format!("http://{addr}"))
            .fetch_shipyard("sockshop")
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::ShipyardFetch);
        assert!(error.to_string().contains("404"));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_fetch_error() {
        let addr = closed_port().await;

        let error = client_for(format!("http://{addr}"))
            .fetch_shipyard("sockshop")
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::ShipyardFetch);
    }

    #[tokio::test]
    async fn malformed_body_is_a_fetch_error() {
        let router = Router::new().route(
            "/v1/project/sockshop/resource/shipyard.yaml",
            get(|| async { "<html>gateway</html>" }),
        );
        let addr = serve(router).await;

        let error = client_for(format!("http://{addr}"))
            .fetch_shipyard("sockshop")
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::ShipyardFetch);
    }
}
