//! Campbell Cloud vendor implementation.
//!
//! A pre-issued `access_token` is used as-is. Without one, the account
//! username and password are exchanged for a bearer token (password grant),
//! cached per username. Timeseries are fetched by station logger id with
//! epoch-millisecond bounds in the path.
//!
//! When neither `measurements` nor a channel map is given, the measurement
//! names are discovered from the station definitions (see [`discovery`]).

mod auth;
mod descriptor;
pub mod discovery;
pub(crate) mod parser;
mod request;

pub use auth::{CampbellAuth, CampbellGrant, TOKEN_URL};
pub use descriptor::campbell_descriptor;
pub use discovery::{CampbellDiscovery, StationMeasurements};
pub use parser::CampbellNormalizer;
pub use request::{CampbellRequestBuilder, DEFAULT_MEASUREMENTS};
