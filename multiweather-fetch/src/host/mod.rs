//! Host APIs for multiweather.
//!
//! - [`http`] - reqwest-backed transport with tracing and domain allowlist

pub mod http;

// Re-export key types
pub use http::HttpClient;
