//! Rendering through the `jsonnet` command-line tool.

mod config;
mod renderer;

pub use config::JsonnetConfig;
pub use renderer::JsonnetRenderer;

/// Tracing target for jsonnet invocations.
pub const TRACING_TARGET: &str = "shipwatch_render::jsonnet";
