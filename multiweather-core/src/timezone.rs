//! Station time zones and local/UTC conversion.
//!
//! Vendors disagree on what time a request range is expressed in. Some take
//! UTC, others want the station's wall-clock time. [`StationTimezone`] names
//! the six US zones a station can be in and converts between the two using
//! the zone's daylight-saving rules for the date in question.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Datetime format used for envelope metadata and most vendor wire strings.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Station Timezone
// ============================================================================

/// Named US zone a station reports in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationTimezone {
    /// Hawaii (US/Hawaii)
    HT,
    /// Alaska (US/Alaska)
    AT,
    /// Pacific (US/Pacific)
    PT,
    /// Mountain (US/Mountain)
    MT,
    /// Central (US/Central)
    CT,
    /// Eastern (US/Eastern)
    ET,
}

impl StationTimezone {
    /// Returns all supported zones.
    pub fn all() -> &'static [StationTimezone] {
        &[Self::HT, Self::AT, Self::PT, Self::MT, Self::CT, Self::ET]
    }

    /// Returns the two-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::HT => "HT",
            Self::AT => "AT",
            Self::PT => "PT",
            Self::MT => "MT",
            Self::CT => "CT",
            Self::ET => "ET",
        }
    }

    /// Returns the IANA zone carrying this zone's DST rules.
    pub fn tz(&self) -> Tz {
        match self {
            Self::HT => chrono_tz::US::Hawaii,
            Self::AT => chrono_tz::US::Alaska,
            Self::PT => chrono_tz::US::Pacific,
            Self::MT => chrono_tz::US::Mountain,
            Self::CT => chrono_tz::US::Central,
            Self::ET => chrono_tz::US::Eastern,
        }
    }

    /// Converts a station-local wall-clock time to UTC.
    ///
    /// An ambiguous time (the repeated hour when DST ends) resolves to
    /// standard time. A time inside the spring-forward gap is read with the
    /// offset in force just before the gap.
    pub fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        let tz = self.tz();
        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(_, standard) => standard.with_timezone(&Utc),
            LocalResult::None => {
                // Half a day back is safely before any US transition on this date.
                let before = tz
                    .offset_from_utc_datetime(&(local - Duration::hours(12)))
                    .fix();
                let utc = local - Duration::seconds(i64::from(before.local_minus_utc()));
                Utc.from_utc_datetime(&utc)
            }
        }
    }

    /// Converts a UTC instant to station-local wall-clock time.
    pub fn to_local(&self, utc: DateTime<Utc>) -> NaiveDateTime {
        utc.with_timezone(&self.tz()).naive_local()
    }

    /// Formats a UTC instant as station-local time.
    pub fn format_local(&self, utc: DateTime<Utc>, fmt: &str) -> String {
        self.to_local(utc).format(fmt).to_string()
    }
}

impl fmt::Display for StationTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for StationTimezone {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HT" => Ok(Self::HT),
            "AT" => Ok(Self::AT),
            "PT" => Ok(Self::PT),
            "MT" => Ok(Self::MT),
            "CT" => Ok(Self::CT),
            "ET" => Ok(Self::ET),
            _ => Err(WeatherError::UnknownZone(s.to_string())),
        }
    }
}

// ============================================================================
// Free Functions
// ============================================================================

/// Converts a local wall-clock time in the named zone to UTC.
///
/// # Errors
///
/// Returns [`WeatherError::UnknownZone`] if `zone_name` is not one of
/// HT, AT, PT, MT, CT, ET.
pub fn to_utc(local: NaiveDateTime, zone_name: &str) -> Result<DateTime<Utc>, WeatherError> {
    Ok(zone_name.parse::<StationTimezone>()?.to_utc(local))
}

/// Converts a UTC instant to local wall-clock time in the named zone.
///
/// # Errors
///
/// Returns [`WeatherError::UnknownZone`] if `zone_name` is not supported.
pub fn to_local(utc: DateTime<Utc>, zone_name: &str) -> Result<NaiveDateTime, WeatherError> {
    Ok(zone_name.parse::<StationTimezone>()?.to_local(utc))
}

/// Formats a UTC instant in the station zone when known, else in UTC.
pub fn format_for_station(utc: DateTime<Utc>, zone: Option<StationTimezone>) -> String {
    match zone {
        Some(zone) => zone.format_local(utc, DATETIME_FORMAT),
        None => utc.format(DATETIME_FORMAT).to_string(),
    }
}

/// Parses a caller-supplied instant.
///
/// Accepts RFC 3339 (`2022-03-13T07:00:00Z`) or `YYYY-MM-DD HH:MM:SS`,
/// the latter read as UTC.
///
/// # Errors
///
/// Returns [`WeatherError::Parameter`] if neither format matches.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, WeatherError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| WeatherError::parameter(format!("invalid datetime '{value}': {e}")))
}

// ============================================================================
// Tests
// ============================================================================
