//! Vendor registry for managing all vendor descriptors.
//!
//! The registry provides static access to all vendor configurations
//! and is the central point for looking up vendors.

use multiweather_core::Vendor;
use multiweather_fetch::AuthKind;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::campbell::campbell_descriptor;
use crate::davis::davis_descriptor;
use crate::descriptor::VendorDescriptor;
use crate::onset::onset_descriptor;
use crate::rainwise::rainwise_descriptor;
use crate::spectrum::spectrum_descriptor;
use crate::zentra::zentra_descriptor;

// ============================================================================
// Static Registry
// ============================================================================

/// Static storage for all vendor descriptors.
static DESCRIPTORS: OnceLock<Vec<VendorDescriptor>> = OnceLock::new();

/// Static storage for CLI name to vendor mapping.
static CLI_NAME_MAP: OnceLock<HashMap<String, Vendor>> = OnceLock::new();

/// Initializes all vendor descriptors, in [`Vendor::all`] order.
fn init_descriptors() -> Vec<VendorDescriptor> {
    vec![
        zentra_descriptor(),
        spectrum_descriptor(),
        onset_descriptor(),
        davis_descriptor(),
        rainwise_descriptor(),
        campbell_descriptor(),
    ]
}

/// Builds the CLI name to vendor mapping.
fn build_cli_name_map(descriptors: &[VendorDescriptor]) -> HashMap<String, Vendor> {
    let mut map = HashMap::new();

    for desc in descriptors {
        map.insert(desc.cli_name().to_string(), desc.id);
        // Config files and env bundles use the upper-case tag
        map.insert(desc.id.env_var().to_ascii_lowercase(), desc.id);
    }

    map
}

// ============================================================================
// Vendor Registry
// ============================================================================

/// Global registry of all vendor descriptors.
///
/// The registry is initialized lazily on first access and provides
/// thread-safe access to vendor configurations.
pub struct VendorRegistry;

impl VendorRegistry {
    /// Returns all vendor descriptors.
    pub fn all() -> &'static [VendorDescriptor] {
        DESCRIPTORS.get_or_init(init_descriptors)
    }

    /// Gets a vendor descriptor by tag.
    pub fn get(id: Vendor) -> Option<&'static VendorDescriptor> {
        Self::all().iter().find(|d| d.id == id)
    }

    /// Returns the CLI name to vendor mapping.
    pub fn cli_name_map() -> &'static HashMap<String, Vendor> {
        CLI_NAME_MAP.get_or_init(|| build_cli_name_map(Self::all()))
    }

    /// Looks up a vendor by name, ignoring case.
    pub fn get_by_cli_name(name: &str) -> Option<&'static VendorDescriptor> {
        let vendor = Self::cli_name_map().get(&name.trim().to_ascii_lowercase())?;
        Self::get(*vendor)
    }

    /// Returns the number of registered vendors.
    pub fn count() -> usize {
        Self::all().len()
    }

    /// Returns all vendor tags.
    pub fn kinds() -> Vec<Vendor> {
        Self::all().iter().map(|d| d.id).collect()
    }

    /// Returns vendors using the given auth scheme.
    pub fn with_auth_kind(kind: AuthKind) -> Vec<&'static VendorDescriptor> {
        Self::all()
            .iter()
            .filter(|d| d.metadata.auth_kind == kind)
            .collect()
    }

    /// Returns every API host, for the HTTP domain allowlist.
    pub fn hosts() -> Vec<String> {
        Self::all()
            .iter()
            .map(|d| d.metadata.host.to_string())
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_all_6_vendors() {
        assert_eq!(VendorRegistry::count(), 6);
        assert_eq!(VendorRegistry::kinds(), Vendor::all().to_vec());
    }

    #[test]
    fn test_registry_get_all_kinds() {
        for vendor in Vendor::all() {
            let desc = VendorRegistry::get(*vendor);
            assert!(desc.is_some(), "Should find vendor {vendor:?}");
            assert_eq!(desc.unwrap().id, *vendor);
        }
    }

    #[test]
    fn test_cli_name_lookup_ignores_case() {
        assert_eq!(
            VendorRegistry::get_by_cli_name("DAVIS").map(|d| d.id),
            Some(Vendor::Davis)
        );
        assert_eq!(
            VendorRegistry::get_by_cli_name(" Onset ").map(|d| d.id),
            Some(Vendor::Onset)
        );
        assert!(VendorRegistry::get_by_cli_name("metos").is_none());
    }

    #[test]
    fn test_auth_kinds() {
        let exchange: Vec<_> = VendorRegistry::with_auth_kind(AuthKind::TokenExchange)
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(exchange, vec![Vendor::Onset, Vendor::Campbell]);
        assert_eq!(VendorRegistry::with_auth_kind(AuthKind::HmacSigned).len(), 1);
    }

    #[test]
    fn test_required_params_include_common_keys() {
        for desc in VendorRegistry::all() {
            let required = desc.required_params();
            assert!(required.contains(&"start_datetime"));
            assert!(required.contains(&"end_datetime"));
            assert!(required.contains(&desc.params.station_param), "{}", desc.id);
            assert_eq!(required.contains(&"tz"), desc.id.needs_local_time());
        }
    }

    #[test]
    fn test_hosts_cover_every_vendor() {
        let hosts = VendorRegistry::hosts();
        assert_eq!(hosts.len(), 6);
        assert!(hosts.contains(&"api.weatherlink.com".to_string()));
    }
}
