//! Trait definitions for multiweather.
//!
//! Normalization is pure (vendor JSON in, canonical readings out), so its
//! capability trait lives here. The network-facing capabilities (auth and
//! request building) live in `multiweather-fetch`.

use serde_json::Value;

use crate::models::{CanonicalReading, CanonicalRequest, Vendor};

/// Maps a vendor payload into canonical readings.
///
/// Implementations must:
/// - keep the vendor's native ordering (never re-sort)
/// - convert units according to the vendor's declared unit
/// - pass malformed leaves through instead of failing the batch
pub trait ResponseNormalizer: Send + Sync {
    /// Returns the vendor this normalizer handles.
    fn vendor(&self) -> Vendor;

    /// Normalizes a successful (2xx, non-empty) payload.
    ///
    /// `request_datetime` is the formatted issue time stamped on every reading.
    fn normalize(
        &self,
        request: &CanonicalRequest,
        raw: &Value,
        request_datetime: &str,
    ) -> Vec<CanonicalReading>;
}
