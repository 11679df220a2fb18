//! Rainwise request builder.

use chrono::Duration;
use multiweather_core::{
    CanonicalRequest, Credentials, DATETIME_FORMAT, RainwiseCredentials, Vendor, WeatherError,
};
use multiweather_fetch::{AuthContext, HttpRequest, RequestBuilder};

/// Registered-mode historical endpoint.
pub const HISTORICAL_URL: &str = "http://api.rainwise.net/main/v1.5/registered/get-historical.php";

/// Aggregation intervals the API accepts, in minutes.
pub const ALLOWED_INTERVALS: &[u32] = &[1, 5, 10, 15, 30, 60];

const DEFAULT_INTERVAL: u32 = 1;
const DEFAULT_FORMAT: &str = "json";

/// Days of history one call may cover at a one-minute interval.
const DAYS_PER_INTERVAL_MINUTE: i64 = 7;

/// Longest window the API serves for `interval` minutes.
///
/// Scales linearly: 7 days at 1 minute, 105 days at 15 minutes.
pub fn max_window(interval: u32) -> Duration {
    Duration::days(DAYS_PER_INTERVAL_MINUTE * i64::from(interval))
}

fn credentials(request: &CanonicalRequest) -> Result<&RainwiseCredentials, WeatherError> {
    match &request.credentials {
        Credentials::Rainwise(creds) => Ok(creds),
        other => Err(WeatherError::auth(format!(
            "{} credentials cannot be used with Rainwise",
            other.vendor().display_name()
        ))),
    }
}

fn interval(request: &CanonicalRequest) -> u32 {
    request.vendor_options.interval.unwrap_or(DEFAULT_INTERVAL)
}

/// Builds `GET /registered/get-historical.php` calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct RainwiseRequestBuilder;

impl RequestBuilder for RainwiseRequestBuilder {
    fn vendor(&self) -> Vendor {
        Vendor::Rainwise
    }

    fn validate(&self, request: &CanonicalRequest) -> Result<(), WeatherError> {
        let creds = credentials(request)?;
        if creds.username != creds.mac {
            return Err(WeatherError::parameter(
                "Rainwise username and mac must be the same value",
            ));
        }
        if creds.sid != creds.pid {
            return Err(WeatherError::parameter(
                "Rainwise sid and pid must be the same value",
            ));
        }

        if let Some(form) = &request.vendor_options.ret_form {
            if !form.eq_ignore_ascii_case(DEFAULT_FORMAT) {
                return Err(WeatherError::parameter(format!(
                    "unsupported ret_form '{form}' (only json)"
                )));
            }
        }

        let interval = interval(request);
        if !ALLOWED_INTERVALS.contains(&interval) {
            return Err(WeatherError::parameter(format!(
                "Rainwise interval must be one of {ALLOWED_INTERVALS:?} minutes, got {interval}"
            )));
        }

        let window = request.end_time - request.start_time;
        let limit = max_window(interval);
        if window > limit {
            return Err(WeatherError::parameter(format!(
                "Rainwise serves at most {} days at a {interval}-minute interval, requested {} hours",
                limit.num_days(),
                window.num_hours()
            )));
        }
        Ok(())
    }

    fn build(
        &self,
        request: &CanonicalRequest,
        auth: &AuthContext,
    ) -> Result<HttpRequest, WeatherError> {
        let AuthContext::Registered { sid, pid } = auth else {
            return Err(auth.mismatch(Vendor::Rainwise));
        };
        let creds = credentials(request)?;
        let zone = request.local_zone()?;
        let format = request
            .vendor_options
            .ret_form
            .as_deref()
            .unwrap_or(DEFAULT_FORMAT)
            .to_ascii_lowercase();

        let query = [
            ("username", creds.username.clone()),
            ("sid", sid.expose().to_string()),
            ("pid", pid.expose().to_string()),
            ("mac", creds.mac.clone()),
            ("format", format),
            ("interval", interval(request).to_string()),
            ("sdate", zone.format_local(request.start_time, DATETIME_FORMAT)),
            ("edate", zone.format_local(request.end_time, DATETIME_FORMAT)),
        ];

        Ok(HttpRequest::get(HttpRequest::parse_url(HISTORICAL_URL)?).with_query(query))
    }
}
