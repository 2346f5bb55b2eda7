//! Internal error types for shipwatch-reqwest.

use thiserror::Error;

/// Result type alias for shipwatch-reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for shipwatch-reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    /// Unexpected HTTP status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

impl From<Error> for shipwatch_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    shipwatch_core::Error::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    shipwatch_core::Error::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else {
                    shipwatch_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => shipwatch_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Url(e) => shipwatch_core::Error::configuration()
                .with_message(e.to_string())
                .with_source(e),
            status @ Error::Status { .. } => {
                shipwatch_core::Error::external_error().with_message(status.to_string())
            }
        }
    }
}
