//! Shipyard model.

use serde::{Deserialize, Serialize};

use crate::{Error, ErrorKind, Result};

/// Ordered list of delivery stages of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipyard {
    /// Stages in pipeline order.
    #[serde(default)]
    pub stages: Vec<Stage>,
}

/// A single delivery stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation_strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_strategy: Option<ApprovalStrategy>,
}

/// How a stage promotes results of a given evaluation outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalStrategy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl Shipyard {
    /// Decodes a shipyard from its YAML form.
    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|err| {
            let message = format!("invalid shipyard: {err}");
            Error::from_source(ErrorKind::ShipyardFetch, err).with_message(message)
        })
    }

    /// Creates a shipyard with plain stages of the given names.
    pub fn from_stage_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stages = names
            .into_iter()
            .map(|name| Stage {
                name: name.into(),
                ..Stage::default()
            })
            .collect();

        Self { stages }
    }

    /// Returns the stage names in pipeline order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name.as_str()).collect()
    }
}
