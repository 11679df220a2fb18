//! Zentra response normalizer.
//!
//! Payload shape:
//!
//! ```json
//! {"data": {"Air Temperature": [{"metadata": {"units": " °C"},
//!                                "readings": [{"datetime": "...", "value": 1.5}]}]}}
//! ```

use multiweather_core::{
    CanonicalReading, CanonicalRequest, Measurement, ReadingGroups, ResponseNormalizer, Unit,
    Vendor,
};
use serde_json::Value;
use tracing::debug;

use crate::normalize::{Field, channel};

fn default_channel(field: Field) -> &'static str {
    match field {
        Field::Atemp => "Air Temperature",
        Field::Pcpn => "Precipitation",
        Field::Relh => "Relative Humidity",
    }
}

/// Merges Zentra per-measurement series into readings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZentraNormalizer;

impl ResponseNormalizer for ZentraNormalizer {
    fn vendor(&self) -> Vendor {
        Vendor::Zentra
    }

    fn normalize(
        &self,
        request: &CanonicalRequest,
        raw: &Value,
        request_datetime: &str,
    ) -> Vec<CanonicalReading> {
        let mut groups = ReadingGroups::new(&request.station_serial, request_datetime);
        let Some(data) = raw.get("data").and_then(Value::as_object) else {
            debug!("Zentra payload has no data object");
            return Vec::new();
        };
        let channels = request.vendor_options.channels.as_ref();

        for field in Field::ALL {
            let name = channel(channels, field, default_channel(field));
            let Some(series) = data.get(name).and_then(Value::as_array) else {
                continue;
            };

            for entry in series {
                let unit = entry
                    .pointer("/metadata/units")
                    .and_then(Value::as_str)
                    .map_or(Unit::Unknown, Unit::from_label);
                let readings = entry.get("readings").and_then(Value::as_array);

                for reading in readings.into_iter().flatten() {
                    let Some(datetime) = reading.get("datetime").and_then(Value::as_str) else {
                        continue;
                    };
                    let value = Measurement::from_field(reading.get("value"), unit);
                    let target = groups.entry(datetime);
                    match field {
                        Field::Atemp => target.atemp = value,
                        Field::Pcpn => target.pcpn = value,
                        Field::Relh => target.relh = value,
                    }
                }
            }
        }

        groups.into_readings()
    }
}
