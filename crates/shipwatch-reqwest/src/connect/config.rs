//! Reqwest client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Configuration for the reqwest HTTP client.
///
/// Shared by the Grafana and configuration-service clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ReqwestConfig {
    /// HTTP request timeout in seconds (unset or zero: no timeout)
    #[cfg_attr(feature = "config", arg(long = "http-timeout", env = "HTTP_TIMEOUT"))]
    #[serde(default)]
    pub http_timeout: Option<u64>,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ReqwestConfig {
    fn default() -> Self {
        Self {
            http_timeout: None,
            user_agent: None,
        }
    }
}

impl ReqwestConfig {
    /// Create a new configuration with the specified timeout.
    pub fn new(timeout_secs: u64) -> Self {
        Self::default().with_timeout(timeout_secs)
    }

    /// Returns the request timeout, if one is configured.
    ///
    /// Zero disables the timeout like an unset value does.
    pub fn effective_timeout(&self) -> Option<Duration> {
        self.http_timeout
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Returns the effective user agent, using default if not set or empty.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .filter(|user_agent| !user_agent.is_empty())
            .unwrap_or_else(Self::default_user_agent)
    }

    fn default_user_agent() -> String {
        format!("shipwatch/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = Some(timeout_secs);
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReqwestConfig::default();
        assert!(config.http_timeout.is_none());
        assert!(config.user_agent.is_none());
        assert_eq!(config.effective_timeout(), None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ReqwestConfig::default()
            .with_timeout(5)
            .with_user_agent("custom-agent/1.0");

        assert_eq!(config.effective_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.effective_user_agent(), "custom-agent/1.0");
    }

    #[test]
    fn test_zero_timeout_disables_timeout() {
        let config = ReqwestConfig::new(0).with_user_agent("");
        assert_eq!(config.effective_timeout(), None);
        assert!(config.effective_user_agent().starts_with("shipwatch/"));
    }
}
