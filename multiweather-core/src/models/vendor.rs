//! Vendor tag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

// ============================================================================
// Vendor
// ============================================================================

/// Supported weather-station cloud vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    /// METER Group ZENTRA Cloud
    Zentra,
    /// Spectrum Technologies SpecConnect
    Spectrum,
    /// Onset HOBOlink
    Onset,
    /// Davis Instruments WeatherLink
    Davis,
    /// Rainwise
    Rainwise,
    /// Campbell Scientific Campbell Cloud
    Campbell,
}

impl Vendor {
    /// Returns the display name for this vendor.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Zentra => "ZENTRA Cloud",
            Self::Spectrum => "Spectrum SpecConnect",
            Self::Onset => "Onset HOBOlink",
            Self::Davis => "Davis WeatherLink",
            Self::Rainwise => "Rainwise",
            Self::Campbell => "Campbell Cloud",
        }
    }

    /// Returns all supported vendors.
    pub fn all() -> &'static [Vendor] {
        &[
            Self::Zentra,
            Self::Spectrum,
            Self::Onset,
            Self::Davis,
            Self::Rainwise,
            Self::Campbell,
        ]
    }

    /// Returns the CLI name for this vendor (lowercase).
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::Zentra => "zentra",
            Self::Spectrum => "spectrum",
            Self::Onset => "onset",
            Self::Davis => "davis",
            Self::Rainwise => "rainwise",
            Self::Campbell => "campbell",
        }
    }

    /// Returns the environment variable holding this vendor's credential bundle.
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::Zentra => "ZENTRA",
            Self::Spectrum => "SPECTRUM",
            Self::Onset => "ONSET",
            Self::Davis => "DAVIS",
            Self::Rainwise => "RAINWISE",
            Self::Campbell => "CAMPBELL",
        }
    }

    /// Returns true if the vendor's wire protocol takes station-local time.
    pub fn needs_local_time(&self) -> bool {
        matches!(self, Self::Zentra | Self::Spectrum | Self::Rainwise)
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for Vendor {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|v| v.cli_name() == wanted)
            .ok_or_else(|| {
                WeatherError::parameter(format!(
                    "vendor '{s}' is not in the supported vendor list"
                ))
            })
    }
}
