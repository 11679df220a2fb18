//! Response envelope returned by every facade call.
//!
//! An envelope always carries enough metadata (vendor, station, range,
//! attempt time, status) for an ingestion pipeline to log the attempt, even
//! when the vendor returned no data.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{CanonicalReading, CanonicalRequest, Vendor};
use crate::timezone::{DATETIME_FORMAT, StationTimezone, format_for_station};

/// Version stamped into every envelope.
pub const BINDING_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Status
// ============================================================================

/// Outcome of one facade call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// The vendor returned data and it was normalized.
    Good,
    /// The vendor or the network failed; see `error_msg`.
    Error,
}

// ============================================================================
// Metadata
// ============================================================================

/// Envelope metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeMetadata {
    /// Vendor queried.
    pub vendor: Vendor,
    /// Station identifier.
    pub station_id: String,
    /// Requested range start (UTC).
    pub start_datetime: String,
    /// Requested range end (UTC).
    pub end_datetime: String,
    /// Station zone, when given.
    pub timezone: Option<StationTimezone>,
    /// When the request was issued (station-local when known).
    pub request_time: String,
    /// Library version.
    pub binding_version: String,
    /// Call outcome.
    pub status: Status,
    /// Vendor HTTP status, when one was received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Error description for ERROR envelopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
}

impl EnvelopeMetadata {
    /// Creates GOOD metadata describing a request issued at `request_time`.
    pub fn for_request(request: &CanonicalRequest, request_time: DateTime<Utc>) -> Self {
        Self {
            vendor: request.vendor(),
            station_id: request.station_serial.clone(),
            start_datetime: request.start_time.format(DATETIME_FORMAT).to_string(),
            end_datetime: request.end_time.format(DATETIME_FORMAT).to_string(),
            timezone: request.station_timezone,
            request_time: format_for_station(request_time, request.station_timezone),
            binding_version: BINDING_VERSION.to_string(),
            status: Status::Good,
            status_code: None,
            error_msg: None,
        }
    }
}

// ============================================================================
// Request Debug
// ============================================================================

/// Placeholder written in place of credential values.
pub const REDACTED: &str = "***";

/// The data call as it was sent, with credential values replaced by
/// [`REDACTED`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDebug {
    /// HTTP method.
    pub method: String,
    /// URL without the query string.
    pub endpoint: String,
    /// Decoded query parameters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, String>,
    /// Request headers.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

// ============================================================================
// Envelope
// ============================================================================

/// The `{metadata, raw, parsed}` result of one facade call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Attempt metadata.
    pub metadata: EnvelopeMetadata,
    /// Vendor payload, unmodified (`null` when none was received).
    pub resp_raw: Value,
    /// Normalized readings (empty for ERROR envelopes).
    pub resp_parsed: Vec<CanonicalReading>,
    /// The data call that produced this envelope, when one was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resp_debug: Option<RequestDebug>,
}

impl ResponseEnvelope {
    /// Creates a GOOD envelope.
    pub fn good(
        mut metadata: EnvelopeMetadata,
        status_code: u16,
        resp_raw: Value,
        resp_parsed: Vec<CanonicalReading>,
    ) -> Self {
        metadata.status = Status::Good;
        metadata.status_code = Some(status_code);
        metadata.error_msg = None;
        Self {
            metadata,
            resp_raw,
            resp_parsed,
            resp_debug: None,
        }
    }

    /// Creates an ERROR envelope; normalization is skipped.
    pub fn error(
        mut metadata: EnvelopeMetadata,
        status_code: Option<u16>,
        error_msg: impl Into<String>,
        resp_raw: Value,
    ) -> Self {
        metadata.status = Status::Error;
        metadata.status_code = status_code;
        metadata.error_msg = Some(error_msg.into());
        Self {
            metadata,
            resp_raw,
            resp_parsed: Vec::new(),
            resp_debug: None,
        }
    }

    /// Attaches the redacted description of the data call.
    #[must_use]
    pub fn with_debug(mut self, debug: RequestDebug) -> Self {
        self.resp_debug = Some(debug);
        self
    }

    /// Returns true if the vendor returned usable data.
    pub fn is_good(&self) -> bool {
        self.metadata.status == Status::Good
    }
}
