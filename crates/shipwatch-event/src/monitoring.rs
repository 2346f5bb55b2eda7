//! Monitoring configuration request.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ConfigureMonitoringData;

/// Monitoring backend technology named by a configure-monitoring event.
///
/// Values other than the known ones are preserved verbatim so they can be
/// reported back in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MonitoringProvider {
    /// Prometheus, the only provider dashboards are generated for.
    Prometheus,
    /// Dynatrace.
    Dynatrace,
    /// Any other provider string.
    Other(String),
}

impl MonitoringProvider {
    /// Returns the provider string as sent on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Prometheus => "prometheus",
            Self::Dynatrace => "dynatrace",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for MonitoringProvider {
    fn from(value: String) -> Self {
        match value.as_str() {
            "prometheus" => Self::Prometheus,
            "dynatrace" => Self::Dynatrace,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for MonitoringProvider {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<MonitoringProvider> for String {
    fn from(value: MonitoringProvider) -> Self {
        match value {
            MonitoringProvider::Other(value) => value,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for MonitoringProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a configure-monitoring event asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoringConfigRequest {
    provider: MonitoringProvider,
    project: String,
    service: String,
}

impl MonitoringConfigRequest {
    /// Creates a new request.
    pub fn new(
        provider: impl Into<MonitoringProvider>,
        project: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            project: project.into(),
            service: service.into(),
        }
    }

    /// Monitoring backend the event concerns.
    pub fn provider(&self) -> &MonitoringProvider {
        &self.provider
    }

    /// Target project name.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Target service name.
    pub fn service(&self) -> &str {
        &self.service
    }
}

impl From<ConfigureMonitoringData> for MonitoringConfigRequest {
    fn from(data: ConfigureMonitoringData) -> Self {
        Self::new(data.provider, data.project, data.service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_matching_is_exact() {
        assert_eq!(MonitoringProvider::from("prometheus"), MonitoringProvider::Prometheus);
        assert_eq!(
            MonitoringProvider::from("Prometheus"),
            MonitoringProvider::Other("Prometheus".to_owned())
        );
    }

    #[test]
    fn unknown_provider_is_preserved() {
        let provider = MonitoringProvider::from("datadog");
        assert_eq!(provider.to_string(), "datadog");
        assert_eq!(String::from(provider), "datadog");
    }

    #[test]
    fn request_from_payload() {
        let data = ConfigureMonitoringData {
            provider: "prometheus".to_owned(),
            project: "sockshop".to_owned(),
            service: "carts".to_owned(),
        };

        let request = MonitoringConfigRequest::from(data);
        assert_eq!(request.provider(), &MonitoringProvider::Prometheus);
        assert_eq!(request.project(), "sockshop");
        assert_eq!(request.service(), "carts");
    }
}
