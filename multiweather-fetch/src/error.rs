//! Transport error types.

use std::time::Duration;

use multiweather_core::WeatherError;
use thiserror::Error;

// ============================================================================
// Transport Error
// ============================================================================

/// Failure to obtain any HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request error reported by the HTTP stack.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection could not be established.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be built.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
}

impl From<TransportError> for WeatherError {
    fn from(err: TransportError) -> Self {
        WeatherError::Transport(err.to_string())
    }
}
