#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod handler;
mod server;

use std::process;

use anyhow::Context;

use crate::config::{Cli, create_registry};
use crate::server::ServerError;

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "shipwatch_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "shipwatch_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "shipwatch_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        match error.downcast_ref::<ServerError>() {
            Some(server_error) => tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %server_error,
                error_code = server_error.error_code(),
                recoverable = server_error.is_recoverable(),
                suggestion = server_error.suggestion().unwrap_or_default(),
                "application terminated with error"
            ),
            None => tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = format!("{error:#}"),
                "application terminated with error"
            ),
        }
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate()?;

    let registry = create_registry(&cli).context("failed to create event handlers")?;
    let router = handler::routes(registry);

    server::serve(router, cli.server).await?;

    Ok(())
}
