// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Multiweather Vendors
//!
//! Vendor adapters and the unified facade.
//!
//! Each vendor module includes:
//!
//! - **Descriptor**: Static configuration (metadata, parameter table, adapter plan)
//! - **Request builder**: Endpoint, query/path encoding and per-vendor limits
//! - **Parser**: Maps the vendor payload to canonical readings
//!
//! ## Supported Vendors
//!
//! | Vendor | Auth | Time on the wire | Notes |
//! |--------|------|------------------|-------|
//! | ZENTRA Cloud | Static token | Station-local | Optional mrid cursors |
//! | SpecConnect | Static API key | Station-local | Four range/count endpoints |
//! | HOBOlink | Client-credentials token | UTC | Up to 10 loggers per call |
//! | WeatherLink | HMAC-SHA256 signature | Unix epoch | Historic range up to 24 h |
//! | Rainwise | Registered sid/pid | Station-local | Window scales with interval |
//! | Campbell Cloud | Token or password grant | Epoch ms | Measurement list in path |
//!
//! ## Usage
//!
//! ```ignore
//! use multiweather_vendors::{ReadingParams, WeatherClient};
//!
//! let client = WeatherClient::new()?;
//! let params = ReadingParams::new()
//!     .with("sn", "117994")
//!     .with("apikey", "...")
//!     .with("apisec", "...")
//!     .with("start_datetime", "2022-02-16 00:00:00")
//!     .with("end_datetime", "2022-02-16 02:00:00");
//! let envelope = client.get_reading_with_params("davis", params).await?;
//! ```

pub mod auth;
pub mod client;
pub mod descriptor;
mod normalize;
pub mod params;
pub mod registry;

// Vendor modules
pub mod campbell;
pub mod davis;
pub mod onset;
pub mod rainwise;
pub mod spectrum;
pub mod zentra;

// Re-export key types
pub use client::WeatherClient;
pub use descriptor::{AdapterPlan, ParamTable, VendorAdapter, VendorDescriptor, VendorMetadata};
pub use params::{ReadingParams, parse_vendor};
pub use registry::VendorRegistry;

// Re-export vendor descriptors
pub use campbell::campbell_descriptor;
pub use davis::davis_descriptor;
pub use onset::onset_descriptor;
pub use rainwise::rainwise_descriptor;
pub use spectrum::spectrum_descriptor;
pub use zentra::zentra_descriptor;

// Re-export auth strategies for convenience
pub use auth::{HmacSignedAuth, RegisteredAuth, StaticKeyAuth, TokenExchangeAuth, TokenGrant};
pub use campbell::CampbellAuth;
