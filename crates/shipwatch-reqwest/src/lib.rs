#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod connect;
mod error;
mod grafana;
mod shipyard;

#[cfg(test)]
mod testing;

pub use crate::connect::{ReqwestClient, ReqwestConfig, TRACING_TARGET};
pub use crate::error::{Error, Result};
pub use crate::shipyard::{ConfigurationServiceClient, ConfigurationServiceConfig};
