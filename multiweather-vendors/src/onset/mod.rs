//! HOBOlink (Onset) vendor implementation.
//!
//! Onset uses OAuth client credentials: `client_id`/`client_secret` are
//! exchanged for a short-lived bearer token, cached per `client_id`. Data
//! calls take up to ten logger serials and UTC range bounds.

mod auth;
mod descriptor;
pub(crate) mod parser;
mod request;

pub use auth::{OnsetGrant, TOKEN_URL};
pub use descriptor::onset_descriptor;
pub use parser::OnsetNormalizer;
pub use request::{MAX_LOGGERS, OnsetRequestBuilder};
