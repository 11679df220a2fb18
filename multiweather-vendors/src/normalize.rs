//! Helpers shared by the vendor normalizers.

use chrono::{DateTime, Utc};
use multiweather_core::{ChannelMap, StationTimezone, format_for_station};

/// Canonical field a vendor channel feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Atemp,
    Pcpn,
    Relh,
}

impl Field {
    pub(crate) const ALL: [Field; 3] = [Field::Atemp, Field::Pcpn, Field::Relh];
}

/// Returns the channel configured for `field`, or `default`.
pub(crate) fn channel<'a>(map: Option<&'a ChannelMap>, field: Field, default: &'a str) -> &'a str {
    let configured = map.and_then(|m| match field {
        Field::Atemp => m.atemp.as_deref(),
        Field::Pcpn => m.pcpn.as_deref(),
        Field::Relh => m.relh.as_deref(),
    });
    configured.unwrap_or(default)
}

/// Renders a Unix timestamp in the station zone, or UTC without one.
pub(crate) fn epoch_datetime(secs: i64, zone: Option<StationTimezone>) -> Option<String> {
    DateTime::<Utc>::from_timestamp(secs, 0).map(|utc| format_for_station(utc, zone))
}
