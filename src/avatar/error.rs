//! Avatar fetch error types

use thiserror::Error;

/// Failure of a single avatar fetch. Cloneable so outcomes can travel
/// through engine events.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The API answered with a non-success status. The body is not inspected.
    #[error("avatar API returned HTTP {status}")]
    Status { status: u16 },

    /// Connection, timeout, or body-read failure.
    #[error("network error: {0}")]
    Network(String),

    /// The configured base URL and request parameters did not form a URL.
    #[error("invalid avatar URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    pub fn status(status: u16) -> Self {
        FetchError::Status { status }
    }

    pub fn network(message: impl Into<String>) -> Self {
        FetchError::Network(message.into())
    }

    pub fn invalid_url(message: impl Into<String>) -> Self {
        FetchError::InvalidUrl(message.into())
    }
}
