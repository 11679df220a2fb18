//! Domain models for multiweather.
//!
//! ## Submodules
//!
//! - [`vendor`] - The vendor tag
//! - [`request`] - Canonical request, credentials, vendor options
//! - [`reading`] - Canonical readings and measurements
//! - [`envelope`] - Response envelope and metadata

mod envelope;
mod reading;
mod request;
mod vendor;

// Re-export everything at the models level
pub use envelope::{
    BINDING_VERSION, EnvelopeMetadata, REDACTED, RequestDebug, ResponseEnvelope, Status,
};
pub use reading::{CanonicalReading, Measurement, ReadingGroups};
pub use request::{
    CampbellCredentials, CanonicalRequest, ChannelMap, Credentials, DavisCredentials,
    OnsetCredentials, RainwiseCredentials, Secret, SpectrumCredentials, VendorOptions,
    ZentraCredentials,
};
pub use vendor::Vendor;
#[cfg(test)]
mod serde_tests;
