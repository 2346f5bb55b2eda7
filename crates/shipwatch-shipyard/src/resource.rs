//! Configuration-service resource envelope.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::{Error, ErrorKind, Result, Shipyard};

/// Resource URI under which a project's shipyard is stored.
pub const SHIPYARD_RESOURCE: &str = "shipyard.yaml";

/// A project resource as returned by the configuration service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResource {
    /// Resource path within the project.
    #[serde(rename = "resourceURI", default)]
    pub resource_uri: String,
    /// Base64-encoded resource content.
    #[serde(default)]
    pub resource_content: String,
}

impl ProjectResource {
    /// Decodes the base64 resource content into text.
    pub fn decode_content(&self) -> Result<String> {
        let bytes = STANDARD
            .decode(self.resource_content.trim())
            .map_err(|err| {
                let message = format!("resource {} is not valid base64: {err}", self.resource_uri);
                Error::from_source(ErrorKind::ShipyardFetch, err).with_message(message)
            })?;

        String::from_utf8(bytes).map_err(|err| {
            let message = format!("resource {} is not valid UTF-8", self.resource_uri);
            Error::from_source(ErrorKind::ShipyardFetch, err).with_message(message)
        })
    }

    /// Decodes the resource content as a shipyard.
    pub fn to_shipyard(&self) -> Result<Shipyard> {
        Shipyard::from_yaml(&self.decode_content()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(content: &str) -> ProjectResource {
        ProjectResource {
            resource_uri: SHIPYARD_RESOURCE.to_owned(),
            resource_content: STANDARD.encode(content),
        }
    }

    #[test]
    fn decodes_shipyard_resource() {
        let resource = encoded("stages:\n  - name: dev\n  - name: production\n");
        let shipyard = resource.to_shipyard().unwrap();
        assert_eq!(shipyard.stage_names(), vec!["dev", "production"]);
    }

    #[test]
    fn reads_configuration_service_json() {
        let json = format!(
            r#"{{"resourceURI":"shipyard.yaml","resourceContent":"{}"}}"#,
            STANDARD.encode("stages:\n  - name: hardening\n")
        );
        let resource: ProjectResource = serde_json::from_str(&json).unwrap();
        assert_eq!(resource.resource_uri, SHIPYARD_RESOURCE);
        assert_eq!(resource.to_shipyard().unwrap().stage_names(), vec!["hardening"]);
    }

    #[test]
    fn invalid_base64_is_a_fetch_error() {
        let resource = ProjectResource {
            resource_uri: SHIPYARD_RESOURCE.to_owned(),
            resource_content: "%%%".to_owned(),
        };
        let error = resource.decode_content().unwrap_err();
        assert_eq!(error.kind, ErrorKind::ShipyardFetch);
    }
}
