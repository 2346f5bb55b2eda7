#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod document;
mod error;

pub use document::DashboardDocument;
pub use error::{BoxedError, Error, ErrorKind, Result};
