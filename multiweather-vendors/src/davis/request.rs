//! Davis request builder.

use chrono::Duration;
use multiweather_core::{CanonicalRequest, Vendor, WeatherError};
use multiweather_fetch::{AuthContext, HttpRequest, RequestBuilder};

/// API base; `historic/{id}` or `current/{id}` follows.
pub const BASE_URL: &str = "https://api.weatherlink.com/v2/";

/// Longest range one historic call may cover.
pub const MAX_HISTORIC_SPAN_HOURS: i64 = 24;

/// Builds signed `GET /historic/{id}` and `/current/{id}` calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct DavisRequestBuilder;

impl RequestBuilder for DavisRequestBuilder {
    fn vendor(&self) -> Vendor {
        Vendor::Davis
    }

    fn validate(&self, request: &CanonicalRequest) -> Result<(), WeatherError> {
        if request.vendor_options.current {
            return Ok(());
        }
        let span = request.end_time - request.start_time;
        if span > Duration::hours(MAX_HISTORIC_SPAN_HOURS) {
            return Err(WeatherError::parameter(format!(
                "WeatherLink historic requests cover at most {MAX_HISTORIC_SPAN_HOURS} hours, got {} minutes",
                span.num_minutes()
            )));
        }
        Ok(())
    }

    fn build(
        &self,
        request: &CanonicalRequest,
        auth: &AuthContext,
    ) -> Result<HttpRequest, WeatherError> {
        let AuthContext::Signed {
            api_key,
            timestamp,
            signature,
        } = auth
        else {
            return Err(auth.mismatch(Vendor::Davis));
        };
        let current = request.vendor_options.current;

        let mut url = HttpRequest::parse_url(BASE_URL)?;
        url.path_segments_mut()
            .map_err(|()| WeatherError::parameter("WeatherLink URL cannot take path segments"))?
            .pop_if_empty()
            .extend([
                if current { "current" } else { "historic" },
                request.station_serial.as_str(),
            ]);

        let mut query = vec![("api-key", api_key.clone()), ("t", timestamp.to_string())];
        if !current {
            query.push(("start-timestamp", request.start_time.timestamp().to_string()));
            query.push(("end-timestamp", request.end_time.timestamp().to_string()));
        }
        query.push(("api-signature", signature.clone()));

        Ok(HttpRequest::get(url).with_query(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use multiweather_core::{Credentials, DavisCredentials, VendorOptions};

    fn request(hours: i64, current: bool) -> CanonicalRequest {
        let start = Utc.with_ymd_and_hms(2019, 5, 23, 20, 24, 41).unwrap();
        CanonicalRequest::new(
            "2",
            Credentials::Davis(DavisCredentials {
                api_key: "abc123".into(),
                api_secret: "xyz987".into(),
            }),
            start,
            start + Duration::hours(hours),
        )
        .with_options(VendorOptions {
            current,
            ..VendorOptions::default()
        })
    }

    fn signed() -> AuthContext {
        AuthContext::Signed {
            api_key: "abc123".into(),
            timestamp: 1_558_729_481,
            signature: "sig".into(),
        }
    }

    #[test]
    fn test_historic_query() {
        let http = DavisRequestBuilder.build(&request(24, false), &signed()).unwrap();
        assert_eq!(http.url.path(), "/v2/historic/2");
        assert_eq!(http.query_value("api-key").as_deref(), Some("abc123"));
        assert_eq!(http.query_value("t").as_deref(), Some("1558729481"));
        assert_eq!(http.query_value("start-timestamp").as_deref(), Some("1558643081"));
        assert_eq!(http.query_value("end-timestamp").as_deref(), Some("1558729481"));
        assert_eq!(http.query_value("api-signature").as_deref(), Some("sig"));
    }

    #[test]
    fn test_current_query_has_no_range() {
        let http = DavisRequestBuilder.build(&request(1, true), &signed()).unwrap();
        assert_eq!(http.url.path(), "/v2/current/2");
        assert_eq!(http.query_value("start-timestamp"), None);
    }

    #[test]
    fn test_historic_span_limit() {
        assert!(DavisRequestBuilder.validate(&request(24, false)).is_ok());
        assert!(DavisRequestBuilder.validate(&request(25, false)).is_err());
        assert!(DavisRequestBuilder.validate(&request(48, true)).is_ok());
    }
}
