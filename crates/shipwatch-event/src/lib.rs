#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod envelope;
mod event_type;
mod monitoring;

pub mod payload;

pub use envelope::{CLOUDEVENTS_SPEC_VERSION, Event};
pub use event_type::EventType;
pub use monitoring::{MonitoringConfigRequest, MonitoringProvider};
pub use payload::ConfigureMonitoringData;
pub use shipwatch_core::{Error, ErrorKind, Result};
