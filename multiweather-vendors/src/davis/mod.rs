//! WeatherLink v2 (Davis) vendor implementation.
//!
//! Every call is signed: the API secret keys an HMAC-SHA-256 over the sorted
//! request parameters, including a fresh Unix timestamp `t`. Historic calls
//! are limited to 24 hours.

mod descriptor;
pub(crate) mod parser;
mod request;

pub use descriptor::davis_descriptor;
pub use parser::DavisNormalizer;
pub use request::{DavisRequestBuilder, MAX_HISTORIC_SPAN_HOURS};
