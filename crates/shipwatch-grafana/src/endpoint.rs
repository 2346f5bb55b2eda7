//! Grafana API endpoint.

use std::fmt;

use url::Url;

use crate::{Error, Result};

/// Base URL and API token of a Grafana instance.
///
/// The base URL may carry a path prefix (Grafana served under a sub-path);
/// API paths are appended to it.
#[derive(Clone, PartialEq, Eq)]
pub struct GrafanaEndpoint {
    base_url: Url,
    token: String,
}

impl fmt::Debug for GrafanaEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrafanaEndpoint")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl GrafanaEndpoint {
    /// Creates an endpoint from a base URL and bearer token.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL does not parse or is not an
    /// `http`/`https` URL.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|err| {
            Error::configuration()
                .with_message(format!("invalid Grafana URL '{base_url}': {err}"))
                .with_source(err)
        })?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(Error::configuration().with_message(format!(
                "Grafana URL '{base_url}' must be an http or https URL"
            )));
        }

        Ok(Self {
            base_url,
            token: token.into(),
        })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the API token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the value of the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// `{base}/api/datasources`
    pub fn datasources_url(&self) -> Url {
        self.api_url(&["api", "datasources"])
    }

    /// `{base}/api/dashboards/db`
    pub fn dashboards_url(&self) -> Url {
        self.api_url(&["api", "dashboards", "db"])
    }

    fn api_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Never fails: cannot-be-a-base URLs are rejected in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn builds_api_urls() {
        let endpoint = GrafanaEndpoint::new("http://grafana:3000", "token").unwrap();
        assert_eq!(
            endpoint.datasources_url().as_str(),
            "http://grafana:3000/api/datasources"
        );
        assert_eq!(
            endpoint.dashboards_url().as_str(),
            "http://grafana:3000/api/dashboards/db"
        );
    }

    #[test]
    fn tolerates_trailing_slash() {
        let endpoint = GrafanaEndpoint::new("http://grafana:3000/", "token").unwrap();
        assert_eq!(
            endpoint.datasources_url().as_str(),
            "http://grafana:3000/api/datasources"
        );
    }

    #[test]
    fn keeps_path_prefix() {
        let endpoint = GrafanaEndpoint::new("https://example.com/grafana/", "token").unwrap();
        assert_eq!(
            endpoint.dashboards_url().as_str(),
            "https://example.com/grafana/api/dashboards/db"
        );
    }

    #[test]
    fn rejects_invalid_urls() {
        let error = GrafanaEndpoint::new("not a url", "token").unwrap_err();
        assert_eq!(error.kind, ErrorKind::Configuration);

        let error = GrafanaEndpoint::new("ftp://grafana", "token").unwrap_err();
        assert_eq!(error.kind, ErrorKind::Configuration);
    }

    #[test]
    fn debug_redacts_token() {
        let endpoint = GrafanaEndpoint::new("http://grafana:3000", "s3cr3t").unwrap();
        let debug = format!("{endpoint:?}");
        assert!(!debug.contains("s3cr3t"));
        assert_eq!(endpoint.bearer(), "Bearer s3cr3t");
    }
}
