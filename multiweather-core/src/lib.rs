// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # multiweather Core
//!
//! Core types, models, and traits shared by the multiweather crates.
//!
//! - Domain models (vendors, canonical requests, readings, envelopes)
//! - Station time zones and local/UTC conversion
//! - Unit conversion
//! - The error taxonomy
//!
//! ## Key Types
//!
//! ### Request Types
//! - [`Vendor`] - Enum of supported weather-station vendors
//! - [`CanonicalRequest`] - Station, range, credentials, options
//! - [`Credentials`] - Vendor-specific credential bundle
//! - [`VendorOptions`] - Optional per-vendor knobs
//!
//! ### Result Types
//! - [`CanonicalReading`] - One normalized reading
//! - [`ResponseEnvelope`] - Metadata, raw payload, normalized readings
//!
//! ### Time
//! - [`StationTimezone`] - HT, AT, PT, MT, CT, ET
//! - [`to_utc`] / [`to_local`] - DST-aware conversion

pub mod error;
pub mod models;
pub mod timezone;
pub mod traits;
pub mod units;

// Re-export error types
pub use error::WeatherError;

// Re-export all model types
pub use models::{
    // Request types
    CampbellCredentials,
    CanonicalRequest,
    ChannelMap,
    Credentials,
    DavisCredentials,
    OnsetCredentials,
    RainwiseCredentials,
    Secret,
    SpectrumCredentials,
    Vendor,
    VendorOptions,
    ZentraCredentials,
    // Result types
    BINDING_VERSION,
    CanonicalReading,
    EnvelopeMetadata,
    Measurement,
    REDACTED,
    ReadingGroups,
    RequestDebug,
    ResponseEnvelope,
    Status,
};

// Re-export time helpers
pub use timezone::{
    DATETIME_FORMAT, StationTimezone, format_for_station, parse_instant, to_local, to_utc,
};

// Re-export traits
pub use traits::ResponseNormalizer;
pub use units::Unit;
