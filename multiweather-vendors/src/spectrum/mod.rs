//! SpecConnect (Spectrum Technologies) vendor implementation.
//!
//! Spectrum authenticates with a customer API key passed as a query value.
//! The endpoint depends on what the caller asked for: a record count, a
//! single day, current conditions, or a station-local datetime range.

mod descriptor;
pub(crate) mod parser;
mod request;

pub use descriptor::spectrum_descriptor;
pub use parser::SpectrumNormalizer;
pub use request::{SpectrumEndpoint, SpectrumRequestBuilder};
