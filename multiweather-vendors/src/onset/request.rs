//! Onset request builder.

use multiweather_core::{CanonicalRequest, Credentials, DATETIME_FORMAT, Vendor, WeatherError};
use multiweather_fetch::{AuthContext, HttpRequest, RequestBuilder};

/// Data endpoint base; `{format}/user/{user_id}` follows.
pub const DATA_URL: &str = "https://webservice.hobolink.com/ws/data/file/";

/// Maximum logger serials per call.
pub const MAX_LOGGERS: usize = 10;

/// The only response format the normalizer reads.
const FORMAT: &str = "JSON";

fn loggers(request: &CanonicalRequest) -> Vec<&str> {
    request
        .station_serial
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Builds `GET /data/file/{format}/user/{user_id}` calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnsetRequestBuilder;

impl RequestBuilder for OnsetRequestBuilder {
    fn vendor(&self) -> Vendor {
        Vendor::Onset
    }

    fn validate(&self, request: &CanonicalRequest) -> Result<(), WeatherError> {
        let count = loggers(request).len();
        if count == 0 {
            return Err(WeatherError::parameter("sn must list at least one logger serial"));
        }
        if count > MAX_LOGGERS {
            return Err(WeatherError::parameter(format!(
                "HOBOlink accepts at most {MAX_LOGGERS} loggers per request, got {count}"
            )));
        }
        if let Some(form) = &request.vendor_options.ret_form {
            if !form.eq_ignore_ascii_case(FORMAT) {
                return Err(WeatherError::parameter(format!(
                    "unsupported ret_form '{form}' (only JSON)"
                )));
            }
        }
        Ok(())
    }

    fn build(
        &self,
        request: &CanonicalRequest,
        auth: &AuthContext,
    ) -> Result<HttpRequest, WeatherError> {
        let AuthContext::Bearer(token) = auth else {
            return Err(auth.mismatch(Vendor::Onset));
        };
        let Credentials::Onset(creds) = &request.credentials else {
            return Err(WeatherError::auth("HOBOlink request without HOBOlink credentials"));
        };

        let mut url = HttpRequest::parse_url(DATA_URL)?;
        url.path_segments_mut()
            .map_err(|()| WeatherError::parameter("HOBOlink data URL cannot take path segments"))?
            .pop_if_empty()
            .extend([FORMAT, "user", creds.user_id.as_str()]);

        let query = [
            ("loggers", loggers(request).join(",")),
            ("start_date_time", request.start_time.format(DATETIME_FORMAT).to_string()),
            ("end_date_time", request.end_time.format(DATETIME_FORMAT).to_string()),
        ];

        HttpRequest::get(url).with_query(query).with_bearer(token.expose())
    }
}
