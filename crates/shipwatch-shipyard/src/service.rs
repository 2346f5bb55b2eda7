//! Shipyard service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::{Result, Shipyard, ShipyardProvider, TRACING_TARGET};

/// Shipyard service wrapper with observability.
///
/// Adds structured logging around any [`ShipyardProvider`]. The provider is
/// wrapped in `Arc` so the service can be cloned freely.
#[derive(Clone)]
pub struct ShipyardService {
    inner: Arc<dyn ShipyardProvider>,
}

impl fmt::Debug for ShipyardService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShipyardService").finish_non_exhaustive()
    }
}

impl ShipyardService {
    /// Creates a new shipyard service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: ShipyardProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Creates a service from an already shared provider.
    pub fn from_arc(provider: Arc<dyn ShipyardProvider>) -> Self {
        Self { inner: provider }
    }

    /// Fetches the current shipyard of `project`.
    pub async fn fetch(&self, project: &str) -> Result<Shipyard> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            project = %project,
            "Fetching shipyard"
        );

        let result = self.inner.fetch_shipyard(project).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(shipyard) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    project = %project,
                    stages = shipyard.stages.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Shipyard fetched"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    project = %project,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Shipyard fetch failed"
                );
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ErrorKind};

    struct Fixed(Option<Shipyard>);

    #[async_trait::async_trait]
    impl ShipyardProvider for Fixed {
        async fn fetch_shipyard(&self, project: &str) -> Result<Shipyard> {
            self.0.clone().ok_or_else(|| {
                Error::shipyard_fetch().with_message(format!("project {project} not found"))
            })
        }
    }

    #[tokio::test]
    async fn forwards_provider_result() {
        let service = ShipyardService::new(Fixed(Some(Shipyard::from_stage_names(["dev"]))));
        let shipyard = service.fetch("sockshop").await.unwrap();
        assert_eq!(shipyard.stage_names(), vec!["dev"]);
    }

    #[tokio::test]
    async fn forwards_provider_error() {
        let service = ShipyardService::new(Fixed(None));
        let error = service.fetch("sockshop").await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::ShipyardFetch);
        assert!(error.to_string().contains("sockshop"));
    }
}
