//! Jsonnet renderer configuration.

use std::path::PathBuf;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default jsonnet executable, resolved through `PATH`.
pub const DEFAULT_BINARY: &str = "jsonnet";

/// Default grafonnet library search path.
pub const DEFAULT_LIBRARY_PATH: &str = "./grafonnet-lib/";

/// Default dashboard template.
pub const DEFAULT_TEMPLATE: &str = "keptn.jsonnet";

/// Configuration for [`JsonnetRenderer`](super::JsonnetRenderer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct JsonnetConfig {
    /// Jsonnet executable
    #[cfg_attr(
        feature = "config",
        arg(long = "jsonnet-binary", env = "JSONNET_BINARY", default_value = DEFAULT_BINARY)
    )]
    #[serde(default = "default_binary")]
    pub binary: PathBuf,

    /// Library search path passed with `-J`
    #[cfg_attr(
        feature = "config",
        arg(
            long = "jsonnet-library-path",
            env = "JSONNET_LIBRARY_PATH",
            default_value = DEFAULT_LIBRARY_PATH
        )
    )]
    #[serde(default = "default_library_path")]
    pub library_path: PathBuf,

    /// Dashboard template file
    #[cfg_attr(
        feature = "config",
        arg(long = "jsonnet-template", env = "JSONNET_TEMPLATE", default_value = DEFAULT_TEMPLATE)
    )]
    #[serde(default = "default_template")]
    pub template: PathBuf,
}

fn default_binary() -> PathBuf {
    PathBuf::from(DEFAULT_BINARY)
}

fn default_library_path() -> PathBuf {
    PathBuf::from(DEFAULT_LIBRARY_PATH)
}

fn default_template() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATE)
}

impl Default for JsonnetConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            library_path: default_library_path(),
            template: default_template(),
        }
    }
}

impl JsonnetConfig {
    /// Set the executable.
    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Set the library search path.
    #[must_use]
    pub fn with_library_path(mut self, library_path: impl Into<PathBuf>) -> Self {
        self.library_path = library_path.into();
        self
    }

    /// Set the template file.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = template.into();
        self
    }
}
