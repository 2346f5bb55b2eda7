//! Reqwest connection module.
//!
//! Wraps the `reqwest` crate; provider implementations live next to it.

mod client;
mod config;

pub use client::{ReqwestClient, TRACING_TARGET};
pub use config::ReqwestConfig;
