//! Vendor descriptor system.
//!
//! A descriptor contains all the static configuration for a vendor:
//! - Metadata (display name, CLI name, auth kind, docs URL, API host)
//! - Parameter table (station parameter, required and optional keys)
//! - Adapter plan (how to build the auth/builder/normalizer triple)

use std::sync::Arc;

use multiweather_core::{ResponseNormalizer, Vendor};
use multiweather_fetch::{AuthKind, AuthStrategy, FetchContext, RequestBuilder, RequestPreparer};

/// Parameter keys every vendor requires.
pub const COMMON_REQUIRED: &[&str] = &["start_datetime", "end_datetime"];

/// Parameter key for the station timezone.
pub const TIMEZONE_PARAM: &str = "tz";

// ============================================================================
// Vendor Descriptor
// ============================================================================

/// Complete descriptor for a vendor.
pub struct VendorDescriptor {
    /// Vendor identifier.
    pub id: Vendor,
    /// Display metadata.
    pub metadata: VendorMetadata,
    /// Caller-side parameter table.
    pub params: ParamTable,
    /// How to build the adapter.
    pub adapter_plan: AdapterPlan,
}

impl VendorDescriptor {
    /// Returns the display name.
    pub fn display_name(&self) -> &str {
        self.metadata.display_name
    }

    /// Returns the CLI name.
    pub fn cli_name(&self) -> &str {
        self.metadata.cli_name
    }

    /// Returns every required parameter key, vendor-specific ones first.
    pub fn required_params(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = self.params.required.to_vec();
        keys.extend_from_slice(COMMON_REQUIRED);
        if self.params.needs_timezone {
            keys.push(TIMEZONE_PARAM);
        }
        keys
    }

    /// Builds the adapter for this vendor.
    pub fn build_adapter(&self, ctx: &FetchContext) -> VendorAdapter {
        (self.adapter_plan.build_adapter)(ctx)
    }
}

impl std::fmt::Debug for VendorDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VendorDescriptor")
            .field("id", &self.id)
            .field("metadata", &self.metadata)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// Static information about a vendor.
#[derive(Debug, Clone)]
pub struct VendorMetadata {
    /// Human-readable name.
    pub display_name: &'static str,
    /// Name used on the command line and in config keys.
    pub cli_name: &'static str,
    /// Auth scheme.
    pub auth_kind: AuthKind,
    /// API documentation.
    pub docs_url: &'static str,
    /// API host (also the HTTP allowlist entry).
    pub host: &'static str,
}

// ============================================================================
// Parameter Table
// ============================================================================

/// Caller-side parameter names for a vendor.
#[derive(Debug, Clone)]
pub struct ParamTable {
    /// Key holding the station identifier.
    pub station_param: &'static str,
    /// Vendor-specific required keys.
    pub required: &'static [&'static str],
    /// Recognized optional keys.
    pub optional: &'static [&'static str],
    /// Whether `tz` is required.
    pub needs_timezone: bool,
}

// ============================================================================
// Adapter
// ============================================================================

/// How to build a vendor's capability triple.
pub struct AdapterPlan {
    /// Builds the adapter; may capture the context clock for token caches.
    pub build_adapter: fn(&FetchContext) -> VendorAdapter,
}

/// The capabilities serving one vendor.
#[derive(Clone)]
pub struct VendorAdapter {
    /// Produces per-call credentials.
    pub auth: Arc<dyn AuthStrategy>,
    /// Completes the request with looked-up details, for vendors that need it.
    pub preparer: Option<Arc<dyn RequestPreparer>>,
    /// Builds the HTTP call.
    pub builder: Arc<dyn RequestBuilder>,
    /// Maps the payload to readings.
    pub normalizer: Arc<dyn ResponseNormalizer>,
}

impl std::fmt::Debug for VendorAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VendorAdapter")
            .field("auth", &self.auth.id())
            .field("preparer", &self.preparer.as_ref().map(|p| p.id()))
            .field("vendor", &self.builder.vendor())
            .finish()
    }
}
