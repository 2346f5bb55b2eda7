//! Grafana provider implementation.
//!
//! This module implements the [`GrafanaProvider`] trait for [`ReqwestClient`].

use std::time::Instant;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use shipwatch_grafana::{
    DashboardUpsert, DataSourceSpec, GrafanaEndpoint, GrafanaProvider, GrafanaResponse,
};
use url::Url;

use crate::connect::ReqwestClient;

/// Tracing target for Grafana API calls.
const TRACING_TARGET: &str = "shipwatch_reqwest::grafana";

impl ReqwestClient {
    /// Posts a JSON body with bearer authentication.
    async fn post_json<T>(
        &self,
        endpoint: &GrafanaEndpoint,
        url: Url,
        body: &T,
    ) -> crate::Result<GrafanaResponse>
    where
        T: Serialize + ?Sized,
    {
        let started_at = Instant::now();
        let payload = serde_json::to_vec(body)?;

        tracing::debug!(
            target: TRACING_TARGET,
            url = %url,
            payload_bytes = payload.len(),
            "Posting to Grafana"
        );

        let http_response = self
            .http()
            .post(url.clone())
            .header(AUTHORIZATION, endpoint.bearer())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status_code = http_response.status().as_u16();
        // Body is informational only; a failed read leaves it empty.
        let body = http_response.text().await.unwrap_or_default();
        let response = GrafanaResponse::new(status_code).with_body(body);

        tracing::debug!(
            target: TRACING_TARGET,
            url = %url,
            status_code,
            success = response.is_success(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Grafana request completed"
        );

        Ok(response)
    }
}

#[async_trait::async_trait]
impl GrafanaProvider for ReqwestClient {
    async fn create_datasource(
        &self,
        endpoint: &GrafanaEndpoint,
        spec: &DataSourceSpec,
    ) -> shipwatch_grafana::Result<GrafanaResponse> {
        self.post_json(endpoint, endpoint.datasources_url(), spec)
            .await
            .map_err(Into::into)
    }

    async fn upsert_dashboard(
        &self,
        endpoint: &GrafanaEndpoint,
        upsert: &DashboardUpsert,
    ) -> shipwatch_grafana::Result<GrafanaResponse> {
        self.post_json(endpoint, endpoint.dashboards_url(), upsert)
            .await
            .map_err(Into::into)
    }
}
