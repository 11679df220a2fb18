//! Campbell measurement discovery.
//!
//! Without `measurements` or a channel map, the station's measurement names
//! come from its definitions: the session endpoint names the organization,
//! the definitions endpoint lists the names. Results are cached per station
//! for the life of the adapter.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use multiweather_core::{CanonicalRequest, ChannelMap, Vendor, WeatherError};
use multiweather_fetch::{AuthContext, FetchContext, HttpRequest, RequestPreparer};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

/// User session endpoint; carries `organization_id`.
pub const SESSION_URL: &str = "https://api.campbellcloud.io/api_v2/user/session";

/// Organization base; `{org}/stations/{station_id}/definitions` follows.
pub const ORGANIZATIONS_URL: &str = "https://api.campbellcloud.io/v3/campbell-cloud/organizations/";

// ============================================================================
// Channel selection
// ============================================================================

/// Measurement names of one station and the channels picked from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationMeasurements {
    /// Every measurement the station defines, in definition order.
    pub names: Vec<String>,
    /// Names feeding atemp, pcpn and relh.
    pub channels: ChannelMap,
}

impl StationMeasurements {
    /// Picks the canonical channels out of `names`.
    pub fn from_names(names: Vec<String>) -> Self {
        let channels = pick_channels(&names);
        Self { names, channels }
    }
}

fn tokens(name: &str) -> Vec<String> {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}

fn is_air_temp(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    if lower.contains("airtemp") || lower.contains("air_temp") || lower.starts_with("airt") {
        return true;
    }
    lower.contains("temp")
        && !["soil", "panel", "ptemp", "batt", "water", "dew"]
            .iter()
            .any(|other| lower.contains(other))
}

fn is_precip(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.contains("rain") || lower.contains("precip")
}

fn is_humidity(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.contains("relhum")
        || lower.contains("humid")
        || tokens(name).iter().any(|t| t == "rh")
}

/// First name matching each field; unmatched fields stay `None`.
pub fn pick_channels(names: &[String]) -> ChannelMap {
    let first = |matches: fn(&str) -> bool| names.iter().find(|n| matches(n)).cloned();
    ChannelMap {
        atemp: first(is_air_temp),
        pcpn: first(is_precip),
        relh: first(is_humidity),
    }
}

// ============================================================================
// Lookups
// ============================================================================

#[derive(Debug, Deserialize)]
struct Session {
    #[serde(default)]
    organization_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Definition {
    #[serde(default)]
    name: Option<String>,
}

/// Sends a lookup call and decodes its JSON body.
async fn get_json<T: DeserializeOwned>(
    ctx: &FetchContext,
    http: &HttpRequest,
    what: &str,
) -> Result<T, WeatherError> {
    debug!(endpoint = %http.endpoint(), "Campbell {what} lookup");
    let response = ctx.transport.execute(http).await?;

    if response.is_auth_failure() {
        return Err(WeatherError::auth(format!(
            "Campbell Cloud rejected the token on {what} lookup ({}): {}",
            response.status,
            response.error_message()
        )));
    }
    if !response.is_success() {
        return Err(WeatherError::VendorApi {
            status_code: response.status,
            message: format!("{what} lookup failed: {}", response.error_message()),
        });
    }
    serde_json::from_str(&response.body).map_err(|e| WeatherError::VendorApi {
        status_code: response.status,
        message: format!("invalid {what} response: {e}"),
    })
}

// ============================================================================
// Preparer
// ============================================================================

/// Fills in `measurements` and the channel map from the station definitions.
#[derive(Debug, Default)]
pub struct CampbellDiscovery {
    stations: Mutex<HashMap<String, StationMeasurements>>,
}

impl CampbellDiscovery {
    /// Creates a preparer with an empty station cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached measurements for `station_id`.
    pub fn cached(&self, station_id: &str) -> Option<StationMeasurements> {
        self.stations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(station_id)
            .cloned()
    }

    fn remember(&self, station_id: &str, found: StationMeasurements) {
        self.stations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(station_id.to_string(), found);
    }

    async fn discover(
        &self,
        station_id: &str,
        token: &str,
        ctx: &FetchContext,
    ) -> Result<StationMeasurements, WeatherError> {
        let session_call = HttpRequest::get(HttpRequest::parse_url(SESSION_URL)?).with_bearer(token)?;
        let session: Session = get_json(ctx, &session_call, "session").await?;
        let organization_id = session
            .organization_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| WeatherError::VendorApi {
                status_code: 200,
                message: "session response has no organization_id".to_string(),
            })?;

        let mut url = HttpRequest::parse_url(ORGANIZATIONS_URL)?;
        url.path_segments_mut()
            .map_err(|()| WeatherError::parameter("Campbell URL cannot take path segments"))?
            .pop_if_empty()
            .extend([organization_id.as_str(), "stations", station_id, "definitions"]);
        let definitions_call = HttpRequest::get(url)
            .with_query([("brief", "true")])
            .with_bearer(token)?;
        let definitions: Vec<Definition> = get_json(ctx, &definitions_call, "definitions").await?;

        let names: Vec<String> = definitions
            .into_iter()
            .filter_map(|d| d.name)
            .filter(|name| !name.trim().is_empty())
            .collect();
        if names.is_empty() {
            return Err(WeatherError::VendorApi {
                status_code: 200,
                message: format!("station {station_id} defines no measurements"),
            });
        }
        Ok(StationMeasurements::from_names(names))
    }
}

#[async_trait]
impl RequestPreparer for CampbellDiscovery {
    fn id(&self) -> &str {
        "campbell.discovery"
    }

    #[instrument(skip_all, fields(station = %request.station_serial))]
    async fn prepare(
        &self,
        request: &CanonicalRequest,
        auth: &AuthContext,
        ctx: &FetchContext,
    ) -> Result<Option<CanonicalRequest>, WeatherError> {
        let options = &request.vendor_options;
        if options.channels.is_some() || options.measurements.as_ref().is_some_and(|m| !m.is_empty())
        {
            return Ok(None);
        }
        let token = match auth {
            AuthContext::StaticKey(token) | AuthContext::Bearer(token) => token,
            other => return Err(other.mismatch(Vendor::Campbell)),
        };

        let station_id = request.station_serial.as_str();
        let found = if let Some(found) = self.cached(station_id) {
            found
        } else {
            let found = self.discover(station_id, token.expose(), ctx).await?;
            info!(count = found.names.len(), "Discovered station measurements");
            self.remember(station_id, found.clone());
            found
        };

        let mut prepared = request.clone();
        prepared.vendor_options.measurements = Some(found.names);
        prepared.vendor_options.channels = Some(found.channels);
        Ok(Some(prepared))
    }
}

// ============================================================================
// Tests
// ============================================================================
