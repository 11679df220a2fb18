//! Core error types for multiweather.
//!
//! The taxonomy splits into two groups. Errors caused by caller
//! misconfiguration (bad parameters, rejected credentials, unknown zone) are
//! raised to the caller. Errors caused by the vendor at request time (non-2xx
//! data responses, empty payloads, network failures) are recorded into the
//! response envelope instead; see [`WeatherError::is_recorded`].

use thiserror::Error;

/// Error type for multiweather operations.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Missing or invalid caller input, detected before any network call.
    #[error("Parameter error: {0}")]
    Parameter(String),

    /// Credential rejection or token-exchange failure.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Non-2xx or empty-payload response from a vendor data endpoint.
    #[error("Vendor API error ({status_code}): {message}")]
    VendorApi {
        /// HTTP status code returned by the vendor.
        status_code: u16,
        /// Message extracted from the vendor response.
        message: String,
    },

    /// Timezone name outside the supported set.
    #[error("Unknown timezone: {0}")]
    UnknownZone(String),

    /// Network failure or timeout.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WeatherError {
    /// Creates a parameter error.
    pub fn parameter(msg: impl Into<String>) -> Self {
        Self::Parameter(msg.into())
    }

    /// Creates an authentication error.
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Returns true if this error is captured into an ERROR envelope rather
    /// than raised to the caller.
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::VendorApi { .. } | Self::Transport(_))
    }

    /// Returns the vendor status code, if the error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::VendorApi { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}
