//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── server: ServerConfig                        # Host, port, shutdown
//! ├── monitoring: MonitoringSettings              # Grafana and Prometheus
//! ├── configuration_service: ConfigurationServiceConfig
//! ├── jsonnet: JsonnetConfig                      # Dashboard renderer
//! └── http: ReqwestConfig                         # Outbound HTTP client
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! shipwatch --grafana-url http://grafana:3000 --port 8080
//!
//! # Or via environment variables
//! GRAFANA_URL=http://grafana:3000 GRAFANA_TOKEN=... shipwatch
//! ```

mod provider;
mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
pub use provider::create_registry;
pub use server::ServerConfig;
use shipwatch_handler::MonitoringSettings;
use shipwatch_render::JsonnetConfig;
use shipwatch_reqwest::{ConfigurationServiceConfig, ReqwestConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "shipwatch")]
#[command(about = "Configures Grafana monitoring for keptn services")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// Grafana and Prometheus endpoints.
    #[clap(flatten)]
    pub monitoring: MonitoringSettings,

    /// Location of the configuration service holding project shipyards.
    #[clap(flatten)]
    pub configuration_service: ConfigurationServiceConfig,

    /// Dashboard renderer configuration.
    #[clap(flatten)]
    pub jsonnet: JsonnetConfig,

    /// Outbound HTTP client configuration.
    #[clap(flatten)]
    pub http: ReqwestConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded first so that clap's `env` fallbacks see its values.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Validates all configuration values.
    ///
    /// Grafana settings are not required here; they are checked for every
    /// configure-monitoring event so that the stub handlers keep working
    /// without them.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            grafana_url = self.monitoring.grafana_url.as_deref().unwrap_or_default(),
            grafana_configured = self.monitoring.has_grafana(),
            prometheus_url = self.monitoring.prometheus_url().unwrap_or_default(),
            "Monitoring configuration"
        );

        if !self.monitoring.has_grafana() {
            tracing::warn!(
                target: TRACING_TARGET_CONFIG,
                "GRAFANA_URL or GRAFANA_TOKEN not set, configure-monitoring events will fail"
            );
        }

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            configuration_service = %self.configuration_service.configuration_service_url,
            jsonnet_binary = %self.jsonnet.binary.display(),
            jsonnet_library_path = %self.jsonnet.library_path.display(),
            jsonnet_template = %self.jsonnet.template.display(),
            http_timeout_secs = self.http.effective_timeout().map(|t| t.as_secs()),
            "Collaborator configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
