//! Configuration: `.env` credential bundles and the optional JSON config file.
//!
//! Each vendor's parameters are a JSON object. They come from the
//! environment variable named after the vendor (`DAVIS='{"sn": ...}'`),
//! usually set through a `.env` file, or from the `vendors` section of the
//! config file. The environment wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use multiweather_core::Vendor;
use multiweather_vendors::{ReadingParams, parse_vendor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

// ============================================================================
// Environment
// ============================================================================

/// Loads a `.env` file into the process environment.
///
/// An explicit path must exist; the default `./.env` is optional.
pub fn load_env_file(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
            info!(path = %path.display(), "Loaded env file");
        }
        None => {
            if let Err(e) = dotenvy::dotenv() {
                debug!(error = %e, "No .env file loaded");
            }
        }
    }
    Ok(())
}

// ============================================================================
// Config File
// ============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Per-vendor parameter bundles, keyed by vendor name.
    #[serde(default)]
    pub vendors: HashMap<String, Map<String, Value>>,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Zone used when neither the command line nor the bundle names one.
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_timezone() -> String {
    "ET".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            default_timezone: default_timezone(),
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("multiweather")
            .join("config.json")
    }

    /// Loads from `path`, or the default path when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("config file {} does not exist", path.display());
                }
                Self::load_from(path)
            }
            None => Self::load_from(&Self::default_path()),
        }
    }

    /// Loads configuration from a specific path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Returns the HTTP timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.general.timeout_secs)
    }

    /// Returns the vendor's bundle from the process environment or the file.
    pub fn vendor_params(&self, vendor: Vendor) -> Result<Option<ReadingParams>> {
        self.vendor_params_with(vendor, |name| std::env::var(name).ok())
    }

    /// Like [`Config::vendor_params`] with an injectable environment lookup.
    pub fn vendor_params_with(
        &self,
        vendor: Vendor,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<ReadingParams>> {
        if let Some(raw) = lookup(vendor.env_var()).filter(|v| !v.trim().is_empty()) {
            let bundle: Map<String, Value> = serde_json::from_str(&raw).with_context(|| {
                format!("{} must hold a JSON object of parameters", vendor.env_var())
            })?;
            debug!(%vendor, source = "env", "Using vendor parameters");
            return Ok(Some(ReadingParams::from(bundle)));
        }

        let from_file = self
            .vendors
            .iter()
            .find(|(name, _)| parse_vendor(name).is_ok_and(|v| v == vendor));
        Ok(from_file.map(|(_, bundle)| {
            debug!(%vendor, source = "config", "Using vendor parameters");
            ReadingParams::from(bundle.clone())
        }))
    }

    /// Lists vendors with a bundle in either source.
    pub fn configured_vendors(&self) -> Vec<Vendor> {
        Vendor::all()
            .iter()
            .copied()
            .filter(|vendor| match self.vendor_params(*vendor) {
                Ok(params) => params.is_some(),
                Err(e) => {
                    warn!(%vendor, error = %e, "Ignoring unreadable vendor parameters");
                    false
                }
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.general.timeout_secs, 30);
        assert_eq!(config.general.default_timezone, "ET");
        assert!(config.vendors.is_empty());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.json"))).is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            json!({
                "general": {"timeout_secs": 10},
                "vendors": {"Davis": {"sn": "117994", "apikey": "k", "apisec": "s"}}
            })
            .to_string(),
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.general.default_timezone, "ET");

        let params = config
            .vendor_params_with(Vendor::Davis, |_| None)
            .unwrap()
            .unwrap();
        assert_eq!(params.get("sn"), Some(&json!("117994")));
        assert!(config.vendor_params_with(Vendor::Onset, |_| None).unwrap().is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = Config::default();
        config.vendors.insert(
            "zentra".into(),
            json!({"sn": "from-file"}).as_object().unwrap().clone(),
        );

        let params = config
            .vendor_params_with(Vendor::Zentra, |name| {
                (name == "ZENTRA").then(|| r#"{"sn": "from-env", "token": "t"}"#.to_string())
            })
            .unwrap()
            .unwrap();
        assert_eq!(params.get("sn"), Some(&json!("from-env")));
    }

    #[test]
    fn test_env_bundle_must_be_json_object() {
        let config = Config::default();
        let err = config.vendor_params_with(Vendor::Rainwise, |_| Some("mac=1".into()));
        assert!(err.is_err());
    }
}
