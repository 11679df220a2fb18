//! Canonical request types.
//!
//! A [`CanonicalRequest`] is what every vendor adapter consumes: a station,
//! a UTC time range, the vendor's credential bundle and any optional knobs.
//! The vendor is not stored separately; it is implied by the
//! [`Credentials`] variant so the two can never disagree.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::WeatherError;
use crate::models::Vendor;
use crate::timezone::StationTimezone;

// ============================================================================
// Secret
// ============================================================================

/// A credential value that never shows up in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Wraps a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// ZENTRA Cloud API token.
#[derive(Debug, Clone, Deserialize)]
pub struct ZentraCredentials {
    /// Account API token.
    pub token: Secret,
}

/// SpecConnect customer API key.
#[derive(Debug, Clone, Deserialize)]
pub struct SpectrumCredentials {
    /// Customer API key.
    #[serde(rename = "apikey")]
    pub api_key: Secret,
}

/// HOBOlink OAuth client credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct OnsetCredentials {
    /// OAuth client id; also the token cache key.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: Secret,
    /// HOBOlink user id used in the data path.
    pub user_id: String,
}

/// WeatherLink v2 key pair.
#[derive(Debug, Clone, Deserialize)]
pub struct DavisCredentials {
    /// API key (sent in the clear).
    #[serde(rename = "apikey")]
    pub api_key: String,
    /// API secret (HMAC key, never sent).
    #[serde(rename = "apisec")]
    pub api_secret: Secret,
}

/// Rainwise registered-mode identifiers.
#[derive(Debug, Clone, Deserialize)]
pub struct RainwiseCredentials {
    /// Registered group name (same as `mac`).
    pub username: String,
    /// Site id assigned by Rainwise.
    pub sid: Secret,
    /// Password id assigned by Rainwise (same as `sid`).
    pub pid: Secret,
    /// Station MAC.
    pub mac: String,
}

/// Campbell Cloud account.
#[derive(Debug, Clone, Deserialize)]
pub struct CampbellCredentials {
    /// Account user name.
    pub username: String,
    /// Account password.
    #[serde(rename = "user_passwd")]
    pub password: Secret,
    /// Station logger id used in the timeseries path.
    pub station_lid: String,
    /// Pre-issued bearer token; skips the password grant when present.
    #[serde(default)]
    pub access_token: Option<Secret>,
}

/// Vendor-specific credential bundle.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// ZENTRA Cloud.
    Zentra(ZentraCredentials),
    /// SpecConnect.
    Spectrum(SpectrumCredentials),
    /// HOBOlink.
    Onset(OnsetCredentials),
    /// WeatherLink.
    Davis(DavisCredentials),
    /// Rainwise.
    Rainwise(RainwiseCredentials),
    /// Campbell Cloud.
    Campbell(CampbellCredentials),
}

impl Credentials {
    /// Returns the vendor these credentials belong to.
    pub fn vendor(&self) -> Vendor {
        match self {
            Self::Zentra(_) => Vendor::Zentra,
            Self::Spectrum(_) => Vendor::Spectrum,
            Self::Onset(_) => Vendor::Onset,
            Self::Davis(_) => Vendor::Davis,
            Self::Rainwise(_) => Vendor::Rainwise,
            Self::Campbell(_) => Vendor::Campbell,
        }
    }
}

// ============================================================================
// Vendor Options
// ============================================================================

/// Maps canonical fields to vendor sensor channels.
///
/// For Onset the values are sensor serial numbers; for Spectrum, Zentra and
/// Campbell they are channel or measurement names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMap {
    /// Channel carrying air temperature.
    #[serde(default)]
    pub atemp: Option<String>,
    /// Channel carrying precipitation.
    #[serde(default)]
    pub pcpn: Option<String>,
    /// Channel carrying relative humidity.
    #[serde(default)]
    pub relh: Option<String>,
}

/// Optional per-vendor fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorOptions {
    /// Sensor channel lookup (Onset, Spectrum, Zentra, Campbell).
    #[serde(default, alias = "sensor_sn")]
    pub channels: Option<ChannelMap>,
    /// Aggregation interval in minutes (Rainwise).
    #[serde(default)]
    pub interval: Option<u32>,
    /// Response format (Onset `JSON`, Rainwise `json`).
    #[serde(default)]
    pub ret_form: Option<String>,
    /// Number of most recent records (Spectrum).
    #[serde(default)]
    pub count: Option<u32>,
    /// Single day to fetch (Spectrum).
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Extra value columns (Spectrum `optValues`).
    #[serde(default, deserialize_with = "de_list")]
    pub opt_values: Option<Vec<String>>,
    /// Lower reading-id cursor (Zentra).
    #[serde(default)]
    pub start_mrid: Option<u64>,
    /// Upper reading-id cursor (Zentra).
    #[serde(default)]
    pub end_mrid: Option<u64>,
    /// Fetch current conditions instead of a range (Davis, Spectrum).
    #[serde(default)]
    pub current: bool,
    /// Measurement names to request (Campbell).
    #[serde(default, deserialize_with = "de_list")]
    pub measurements: Option<Vec<String>>,
}

/// Accepts either a JSON list or a comma-delimited string.
fn de_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrString {
        List(Vec<String>),
        Str(String),
    }

    Ok(match Option::<ListOrString>::deserialize(deserializer)? {
        None => None,
        Some(ListOrString::List(items)) => Some(items),
        Some(ListOrString::Str(s)) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect(),
        ),
    })
}

// ============================================================================
// Canonical Request
// ============================================================================

/// A vendor-neutral request for readings over `[start_time, end_time)`.
#[derive(Debug, Clone)]
pub struct CanonicalRequest {
    /// Station identifier (serial, MAC, logger list or station id).
    pub station_serial: String,
    /// Vendor credential bundle; selects the vendor.
    pub credentials: Credentials,
    /// Range start (UTC).
    pub start_time: DateTime<Utc>,
    /// Range end (UTC).
    pub end_time: DateTime<Utc>,
    /// Station zone, required when the vendor takes local time.
    pub station_timezone: Option<StationTimezone>,
    /// Optional per-vendor fields.
    pub vendor_options: VendorOptions,
}

impl CanonicalRequest {
    /// Creates a request without timezone or options.
    pub fn new(
        station_serial: impl Into<String>,
        credentials: Credentials,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            station_serial: station_serial.into(),
            credentials,
            start_time,
            end_time,
            station_timezone: None,
            vendor_options: VendorOptions::default(),
        }
    }

    /// Sets the station timezone.
    #[must_use]
    pub fn with_timezone(mut self, zone: StationTimezone) -> Self {
        self.station_timezone = Some(zone);
        self
    }

    /// Sets the vendor options.
    #[must_use]
    pub fn with_options(mut self, options: VendorOptions) -> Self {
        self.vendor_options = options;
        self
    }

    /// Returns the vendor selected by the credentials.
    pub fn vendor(&self) -> Vendor {
        self.credentials.vendor()
    }

    /// Returns the station zone or fails when the vendor needs one.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Parameter`] when no zone was given.
    pub fn local_zone(&self) -> Result<StationTimezone, WeatherError> {
        self.station_timezone.ok_or_else(|| {
            WeatherError::parameter(format!(
                "{} requires a station timezone (HT, AT, PT, MT, CT, ET)",
                self.vendor()
            ))
        })
    }

    /// Checks the vendor-independent invariants.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Parameter`] for an empty station, an empty or
    /// inverted range, or a missing zone for a local-time vendor.
    pub fn validate(&self) -> Result<(), WeatherError> {
        if self.station_serial.trim().is_empty() {
            return Err(WeatherError::parameter("station serial must not be empty"));
        }
        if self.start_time >= self.end_time {
            return Err(WeatherError::parameter(format!(
                "start_datetime ({}) must be earlier than end_datetime ({})",
                self.start_time, self.end_time
            )));
        }
        if self.vendor().needs_local_time() {
            self.local_zone()?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn zentra() -> Credentials {
        Credentials::Zentra(ZentraCredentials {
            token: Secret::new("tok"),
        })
    }

    fn range() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2022, 2, 16, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2022, 2, 16, 2, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_vendor_from_credentials() {
        let (start, end) = range();
        let req = CanonicalRequest::new("z6-1", zentra(), start, end);
        assert_eq!(req.vendor(), Vendor::Zentra);
    }

    #[test]
    fn test_validate_inverted_range() {
        let (start, end) = range();
        let req = CanonicalRequest::new("z6-1", zentra(), end, start)
            .with_timezone(StationTimezone::ET);
        assert!(matches!(req.validate(), Err(WeatherError::Parameter(_))));
    }

    #[test]
    fn test_validate_requires_zone_for_local_vendor() {
        let (start, end) = range();
        let req = CanonicalRequest::new("z6-1", zentra(), start, end);
        assert!(req.validate().is_err());
        assert!(req.with_timezone(StationTimezone::ET).validate().is_ok());
    }

    #[test]
    fn test_secret_debug_redacted() {
        let creds = zentra();
        let dbg = format!("{creds:?}");
        assert!(!dbg.contains("tok\""));
        assert!(dbg.contains("***"));
    }

    #[test]
    fn test_options_accept_comma_list() {
        let opts: VendorOptions =
            serde_json::from_str(r#"{"opt_values": "a, b,c", "sensor_sn": {"atemp": "123"}}"#)
                .unwrap();
        assert_eq!(
            opts.opt_values,
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(opts.channels.unwrap().atemp.as_deref(), Some("123"));
    }
}
