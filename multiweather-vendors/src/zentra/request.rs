//! Zentra request builder.

use multiweather_core::{CanonicalRequest, Vendor, WeatherError};
use multiweather_fetch::{AuthContext, HttpRequest, RequestBuilder};
use reqwest::header::AUTHORIZATION;

/// Readings endpoint.
pub const READINGS_URL: &str = "https://zentracloud.com/api/v3/get_readings/";

/// Station-local datetime format.
const DATE_FORMAT: &str = "%m-%d-%Y %H:%M";

/// Builds `GET /get_readings` calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZentraRequestBuilder;

impl RequestBuilder for ZentraRequestBuilder {
    fn vendor(&self) -> Vendor {
        Vendor::Zentra
    }

    fn build(
        &self,
        request: &CanonicalRequest,
        auth: &AuthContext,
    ) -> Result<HttpRequest, WeatherError> {
        let AuthContext::StaticKey(token) = auth else {
            return Err(auth.mismatch(Vendor::Zentra));
        };
        let zone = request.local_zone()?;
        let options = &request.vendor_options;

        let mut query = vec![
            ("device_sn", request.station_serial.clone()),
            ("start_date", zone.format_local(request.start_time, DATE_FORMAT)),
            ("end_date", zone.format_local(request.end_time, DATE_FORMAT)),
        ];
        if let Some(mrid) = options.start_mrid {
            query.push(("start_mrid", mrid.to_string()));
        }
        if let Some(mrid) = options.end_mrid {
            query.push(("end_mrid", mrid.to_string()));
        }

        HttpRequest::get(HttpRequest::parse_url(READINGS_URL)?)
            .with_query(query)
            .with_header(AUTHORIZATION, &format!("Token {}", token.expose()))
    }
}
