#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod configurator;
mod handler;
mod registry;
mod settings;

pub use configurator::MonitoringConfigurator;
pub use handler::{ConfigureMonitoringHandler, EventHandler, StubHandler};
pub use registry::HandlerRegistry;
pub use settings::MonitoringSettings;
pub use shipwatch_core::{Error, ErrorKind, Result};

/// Tracing target for monitoring configuration.
pub const TRACING_TARGET_MONITORING: &str = "shipwatch_handler::monitoring";

/// Tracing target for placeholder handlers.
pub const TRACING_TARGET_STUB: &str = "shipwatch_handler::stub";

/// Tracing target for event dispatch.
pub const TRACING_TARGET_DISPATCH: &str = "shipwatch_handler::dispatch";
