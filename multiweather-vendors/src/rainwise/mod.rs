//! Rainwise vendor implementation (registered mode).
//!
//! Registered stations authenticate with a site id and password id passed as
//! query values; no token step. Range bounds are station-local. The public,
//! unregistered API is not supported.

mod descriptor;
pub(crate) mod parser;
mod request;

pub use descriptor::rainwise_descriptor;
pub use parser::RainwiseNormalizer;
pub use request::{ALLOWED_INTERVALS, RainwiseRequestBuilder, max_window};
