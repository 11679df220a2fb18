// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # multiweather Fetch
//!
//! HTTP plumbing and vendor capability traits for multiweather.
//!
//! ## Transport
//!
//! - [`transport::HttpRequest`] - A built call: method, URL, headers, body
//! - [`transport::Transport`] - Executes calls; [`host::http::HttpClient`]
//!   is the reqwest-backed implementation
//!
//! ## Capabilities
//!
//! - [`strategy::AuthStrategy`] - Produces per-call credentials
//! - [`strategy::RequestPreparer`] - Optional lookups before the data call
//! - [`strategy::RequestBuilder`] - Builds the vendor call
//! - [`strategy::ResponseNormalizer`] - Maps payloads to canonical readings
//!
//! ## State
//!
//! - [`token_cache::TokenCache`] - Per-credential bearer token cache
//! - [`clock::Clock`] - Injectable time source
//! - [`context::FetchContext`] - Bundles transport, clock and settings
//!
//! ## Example
//!
//! ```ignore
//! use multiweather_fetch::{FetchContext, HttpRequest};
//!
//! let ctx = FetchContext::new()?;
//! let url = HttpRequest::parse_url("https://api.weatherlink.com/v2/current/2")?;
//! let response = ctx.transport.execute(&HttpRequest::get(url)).await?;
//! ```

pub mod clock;
pub mod context;
pub mod error;
pub mod host;
pub mod strategy;
pub mod token_cache;
pub mod transport;

// Re-export key types at crate root

// Errors
pub use error::TransportError;

// Host APIs
pub use host::http::HttpClient;

// Transport
pub use transport::{HttpRequest, RequestBody, Transport, TransportResponse};

// Capabilities & context
pub use clock::{Clock, ManualClock, SystemClock};
pub use context::{FetchContext, FetchContextBuilder, FetchSettings};
pub use strategy::{
    AuthContext, AuthKind, AuthStrategy, RequestBuilder, RequestPreparer, ResponseNormalizer,
};
pub use token_cache::{IssuedToken, TokenCache};
