//! Mock shipyard provider.

use std::sync::{Arc, Mutex};

use shipwatch_core::{Error, Result};
use shipwatch_shipyard::{Shipyard, ShipyardProvider};

use super::lock;

/// Mock shipyard provider.
///
/// Serves the same shipyard for every project, or fails every fetch.
#[derive(Debug, Clone, Default)]
pub struct MockShipyardProvider {
    shipyard: Option<Shipyard>,
    projects: Arc<Mutex<Vec<String>>>,
}

impl MockShipyardProvider {
    /// Serves a shipyard with the given stage names.
    pub fn with_stages<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            shipyard: Some(Shipyard::from_stage_names(names)),
            projects: Arc::default(),
        }
    }

    /// Fails every fetch with a shipyard-fetch error.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Returns the projects requested so far.
    pub fn requested_projects(&self) -> Vec<String> {
        lock(&self.projects).clone()
    }
}

#[async_trait::async_trait]
impl ShipyardProvider for MockShipyardProvider {
    async fn fetch_shipyard(&self, project: &str) -> Result<Shipyard> {
        lock(&self.projects).push(project.to_owned());

        self.shipyard.clone().ok_or_else(|| {
            Error::shipyard_fetch()
                .with_message(format!("resource shipyard.yaml of project {project} not found"))
        })
    }
}
