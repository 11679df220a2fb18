//! Parameter-bag parsing.
//!
//! Callers of the facade hand over a flat key/value bag (`sn`, `apikey`,
//! `start_datetime`, `tz`, ...). [`ReadingParams::into_request`] checks it
//! against the vendor's parameter table and produces a [`CanonicalRequest`].
//! Every check here runs before any network call.

use multiweather_core::{
    CanonicalRequest, Credentials, StationTimezone, Vendor, VendorOptions, WeatherError,
    parse_instant,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::descriptor::{TIMEZONE_PARAM, VendorDescriptor};
use crate::registry::VendorRegistry;

/// Accepted spellings mapped to canonical keys.
const ALIASES: &[(&str, &str)] = &[
    ("start_date", "start_datetime"),
    ("end_date", "end_datetime"),
    ("station_timezone", TIMEZONE_PARAM),
    ("timezone", TIMEZONE_PARAM),
];

/// Option keys that arrive as strings from env files but are numeric.
const NUMERIC_OPTIONS: &[&str] = &["interval", "count", "start_mrid", "end_mrid"];

/// Resolves a vendor name, ignoring case.
///
/// # Errors
///
/// Returns [`WeatherError::Parameter`] for an unknown vendor.
pub fn parse_vendor(name: &str) -> Result<Vendor, WeatherError> {
    VendorRegistry::get_by_cli_name(name)
        .map(|d| d.id)
        .ok_or_else(|| {
            let known: Vec<_> = Vendor::all().iter().map(Vendor::cli_name).collect();
            WeatherError::parameter(format!(
                "unknown vendor '{name}' (expected one of: {})",
                known.join(", ")
            ))
        })
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items.iter().map(as_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

fn deserialize<T: DeserializeOwned>(
    values: &Map<String, Value>,
    vendor: Vendor,
    what: &str,
) -> Result<T, WeatherError> {
    serde_json::from_value(Value::Object(values.clone()))
        .map_err(|e| WeatherError::parameter(format!("invalid {vendor} {what}: {e}")))
}

// ============================================================================
// Reading Params
// ============================================================================

/// A caller-side parameter bag for one `get_reading` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingParams {
    values: Map<String, Value>,
}

impl ReadingParams {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a parameter in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Fills keys not already present from `other`.
    pub fn merge_missing(&mut self, other: &Map<String, Value>) {
        for (key, value) in other {
            self.values
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }

    /// Returns a parameter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns true if `key` holds a non-blank value.
    pub fn contains(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(|v| !is_blank(v))
    }

    /// Returns the station zone under any of its accepted keys.
    pub fn timezone(&self) -> Option<String> {
        self.canonicalized().get(TIMEZONE_PARAM).map(as_text)
    }

    /// Returns the bag with aliases folded into canonical keys and blank
    /// values dropped.
    fn canonicalized(&self) -> Map<String, Value> {
        let mut values: Map<String, Value> = self
            .values
            .iter()
            .filter(|(_, v)| !is_blank(v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (alias, canonical) in ALIASES {
            if let Some(value) = values.remove(*alias) {
                values.entry((*canonical).to_string()).or_insert(value);
            }
        }
        values
    }

    /// Lists required keys that are absent, `null` or empty.
    pub fn missing(&self, descriptor: &VendorDescriptor) -> Vec<&'static str> {
        let values = self.canonicalized();
        descriptor
            .required_params()
            .into_iter()
            .filter(|key| !values.contains_key(*key))
            .collect()
    }

    /// Converts the bag into a request for `vendor`.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::Parameter`] for missing required keys, unparseable
    ///   datetimes or malformed options.
    /// - [`WeatherError::UnknownZone`] for a `tz` outside HT/AT/PT/MT/CT/ET.
    pub fn into_request(self, vendor: Vendor) -> Result<CanonicalRequest, WeatherError> {
        let descriptor = VendorRegistry::get(vendor)
            .ok_or_else(|| WeatherError::parameter(format!("unsupported vendor {vendor}")))?;

        let missing = self.missing(descriptor);
        if !missing.is_empty() {
            return Err(WeatherError::parameter(format!(
                "missing required parameter(s) for {}: {}",
                descriptor.display_name(),
                missing.join(", ")
            )));
        }

        let mut values = self.canonicalized();

        // Serials, ids and keys sometimes arrive as JSON numbers
        for key in descriptor.params.required {
            if let Some(value) = values.get_mut(*key) {
                if !value.is_string() {
                    *value = Value::String(as_text(value));
                }
            }
        }
        for key in NUMERIC_OPTIONS {
            if let Some(Value::String(s)) = values.get(*key) {
                let parsed = s.trim().parse::<u64>().map_err(|_| {
                    WeatherError::parameter(format!("{key} must be a whole number, got '{s}'"))
                })?;
                values.insert((*key).to_string(), Value::from(parsed));
            }
        }

        let text = |key: &str| values.get(key).map(as_text).unwrap_or_default();
        let station_serial = text(descriptor.params.station_param);
        let start_time = parse_instant(&text("start_datetime"))?;
        let end_time = parse_instant(&text("end_datetime"))?;
        let station_timezone = values
            .get(TIMEZONE_PARAM)
            .map(|tz| as_text(tz).parse::<StationTimezone>())
            .transpose()?;

        let credentials = match vendor {
            Vendor::Zentra => Credentials::Zentra(deserialize(&values, vendor, "credentials")?),
            Vendor::Spectrum => Credentials::Spectrum(deserialize(&values, vendor, "credentials")?),
            Vendor::Onset => Credentials::Onset(deserialize(&values, vendor, "credentials")?),
            Vendor::Davis => Credentials::Davis(deserialize(&values, vendor, "credentials")?),
            Vendor::Rainwise => Credentials::Rainwise(deserialize(&values, vendor, "credentials")?),
            Vendor::Campbell => Credentials::Campbell(deserialize(&values, vendor, "credentials")?),
        };
        let options: VendorOptions = deserialize(&values, vendor, "options")?;

        let mut request = CanonicalRequest::new(station_serial, credentials, start_time, end_time)
            .with_options(options);
        request.station_timezone = station_timezone;
        Ok(request)
    }
}

impl From<Map<String, Value>> for ReadingParams {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ReadingParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
