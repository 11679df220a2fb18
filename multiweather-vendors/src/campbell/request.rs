//! Campbell request builder.

use multiweather_core::{CanonicalRequest, Credentials, Vendor, WeatherError};
use multiweather_fetch::{AuthContext, HttpRequest, RequestBuilder};

use crate::normalize::{Field, channel};

/// Timeseries base; `{station_lid}/{start_ms}/{end_ms}/{measurements}` follows.
pub const TIMESERIES_URL: &str = "https://api.campbellcloud.io/api_v2/measurement/timeseries/";

/// Measurements feeding atemp, pcpn and relh when no channel map is given.
pub const DEFAULT_MEASUREMENTS: [&str; 3] = [
    "airtemp_c_avg_table5",
    "rain_mm_tot_table5",
    "relhum_avg_table5",
];

/// Measurement name feeding `field`.
pub(crate) fn measurement_for(request: &CanonicalRequest, field: Field) -> &str {
    let default = match field {
        Field::Atemp => DEFAULT_MEASUREMENTS[0],
        Field::Pcpn => DEFAULT_MEASUREMENTS[1],
        Field::Relh => DEFAULT_MEASUREMENTS[2],
    };
    channel(request.vendor_options.channels.as_ref(), field, default)
}

/// Explicit `measurements`, else the three mapped channels.
pub(crate) fn measurements(request: &CanonicalRequest) -> Vec<String> {
    match request.vendor_options.measurements.as_ref() {
        Some(list) if !list.is_empty() => list.clone(),
        _ => Field::ALL
            .iter()
            .map(|field| measurement_for(request, *field).to_string())
            .collect(),
    }
}

/// Builds `GET /measurement/timeseries/...` calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct CampbellRequestBuilder;

impl RequestBuilder for CampbellRequestBuilder {
    fn vendor(&self) -> Vendor {
        Vendor::Campbell
    }

    fn build(
        &self,
        request: &CanonicalRequest,
        auth: &AuthContext,
    ) -> Result<HttpRequest, WeatherError> {
        let token = match auth {
            AuthContext::StaticKey(token) | AuthContext::Bearer(token) => token,
            other => return Err(other.mismatch(Vendor::Campbell)),
        };
        let Credentials::Campbell(creds) = &request.credentials else {
            return Err(WeatherError::auth(
                "Campbell Cloud request without Campbell credentials",
            ));
        };

        let start_ms = request.start_time.timestamp_millis().to_string();
        let end_ms = request.end_time.timestamp_millis().to_string();
        let measurements = measurements(request).join(",");

        let mut url = HttpRequest::parse_url(TIMESERIES_URL)?;
        url.path_segments_mut()
            .map_err(|()| WeatherError::parameter("Campbell URL cannot take path segments"))?
            .pop_if_empty()
            .extend([
                creds.station_lid.as_str(),
                start_ms.as_str(),
                end_ms.as_str(),
                measurements.as_str(),
            ]);

        HttpRequest::get(url).with_bearer(token.expose())
    }
}
