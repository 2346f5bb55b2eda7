//! Grafana response summary.

use serde::{Deserialize, Serialize};

/// Maximum number of characters of a response body kept for logging.
pub const MAX_BODY_CHARS: usize = 1024;

/// Outcome of a Grafana API call that produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrafanaResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body, truncated to [`MAX_BODY_CHARS`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl GrafanaResponse {
    /// Creates a response with the given status and no body.
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            body: None,
        }
    }

    /// Attaches a response body, truncating it.
    #[must_use]
    pub fn with_body(mut self, body: impl AsRef<str>) -> Self {
        let body: String = body.as_ref().chars().take(MAX_BODY_CHARS).collect();
        self.body = (!body.is_empty()).then_some(body);
        self
    }

    /// Returns whether the call succeeded (2xx status code).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        assert!(GrafanaResponse::new(200).is_success());
        assert!(!GrafanaResponse::new(409).is_success());
        assert!(!GrafanaResponse::new(500).is_success());
    }

    #[test]
    fn body_is_truncated() {
        let response = GrafanaResponse::new(200).with_body("x".repeat(4096));
        assert_eq!(response.body.map(|body| body.len()), Some(MAX_BODY_CHARS));
    }

    #[test]
    fn empty_body_is_dropped() {
        assert!(GrafanaResponse::new(204).with_body("").body.is_none());
    }
}
