//! Spectrum request builder.

use std::fmt;

use multiweather_core::{CanonicalRequest, DATETIME_FORMAT, Vendor, VendorOptions, WeatherError};
use multiweather_fetch::{AuthContext, HttpRequest, RequestBuilder};

/// Customer API base.
pub const BASE_URL: &str = "https://api.specconnect.net:6703/api/Customer/";

// ============================================================================
// Endpoint
// ============================================================================

/// The four customer data endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumEndpoint {
    /// Most recent N records.
    GetDataByRange,
    /// One calendar day.
    GetDataByDate,
    /// Latest record.
    GetData,
    /// Station-local datetime range.
    GetDataInDateTimeRange,
}

impl SpectrumEndpoint {
    /// Picks the endpoint for the given options.
    ///
    /// Precedence: `count`, then `date`, then `current`, else the range.
    pub fn select(options: &VendorOptions) -> Self {
        if options.count.is_some_and(|c| c > 0) {
            Self::GetDataByRange
        } else if options.date.is_some() {
            Self::GetDataByDate
        } else if options.current {
            Self::GetData
        } else {
            Self::GetDataInDateTimeRange
        }
    }

    /// Returns the path segment.
    pub fn path(&self) -> &'static str {
        match self {
            Self::GetDataByRange => "GetDataByRange",
            Self::GetDataByDate => "GetDataByDate",
            Self::GetData => "GetData",
            Self::GetDataInDateTimeRange => "GetDataInDateTimeRange",
        }
    }
}

impl fmt::Display for SpectrumEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builds SpecConnect customer data calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectrumRequestBuilder;

impl RequestBuilder for SpectrumRequestBuilder {
    fn vendor(&self) -> Vendor {
        Vendor::Spectrum
    }

    fn build(
        &self,
        request: &CanonicalRequest,
        auth: &AuthContext,
    ) -> Result<HttpRequest, WeatherError> {
        let AuthContext::StaticKey(api_key) = auth else {
            return Err(auth.mismatch(Vendor::Spectrum));
        };
        let options = &request.vendor_options;
        let endpoint = SpectrumEndpoint::select(options);

        let mut query = vec![
            ("customerApiKey", api_key.expose().to_string()),
            ("serialNumber", request.station_serial.clone()),
        ];
        match endpoint {
            SpectrumEndpoint::GetDataByRange => {
                query.push(("count", options.count.unwrap_or_default().to_string()));
            }
            SpectrumEndpoint::GetDataByDate => {
                if let Some(date) = options.date {
                    query.push(("date", date.format("%Y-%m-%d").to_string()));
                }
            }
            SpectrumEndpoint::GetData => {}
            SpectrumEndpoint::GetDataInDateTimeRange => {
                let zone = request.local_zone()?;
                query.push(("startDate", zone.format_local(request.start_time, DATETIME_FORMAT)));
                query.push(("endDate", zone.format_local(request.end_time, DATETIME_FORMAT)));
            }
        }
        if let Some(values) = options.opt_values.as_ref().filter(|v| !v.is_empty()) {
            query.push(("optValues", values.join(",")));
        }

        let url = HttpRequest::parse_url(&format!("{BASE_URL}{endpoint}"))?;
        Ok(HttpRequest::get(url).with_query(query))
    }
}
