//! Davis response normalizer.
//!
//! WeatherLink reports `sensors[].data[]`, each record stamped with a Unix
//! `ts`. Different sensor types use different field names for the same
//! quantity, so each canonical field has a list of candidates checked in
//! order. Records from different sensors sharing a `ts` are merged.

use multiweather_core::{
    CanonicalReading, CanonicalRequest, Measurement, ReadingGroups, ResponseNormalizer, Unit,
    Vendor,
};
use serde_json::Value;

use crate::normalize::epoch_datetime;

const TEMP_FIELDS: &[&str] = &["temp_out", "temp_avg", "temp_last", "temp"];
const HUM_FIELDS: &[&str] = &["hum_out", "hum_last", "hum"];
const RAIN_FIELDS: &[(&str, Unit)] = &[
    ("rainfall_in", Unit::Inches),
    ("rainfall_mm", Unit::Millimeters),
];

fn first_present<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| record.get(*k))
        .find(|v| !v.is_null())
}

/// Maps WeatherLink sensor records to readings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DavisNormalizer;

impl ResponseNormalizer for DavisNormalizer {
    fn vendor(&self) -> Vendor {
        Vendor::Davis
    }

    fn normalize(
        &self,
        request: &CanonicalRequest,
        raw: &Value,
        request_datetime: &str,
    ) -> Vec<CanonicalReading> {
        let mut groups = ReadingGroups::new(&request.station_serial, request_datetime);
        let sensors = raw.get("sensors").and_then(Value::as_array);

        let records = sensors
            .into_iter()
            .flatten()
            .filter_map(|s| s.get("data").and_then(Value::as_array))
            .flatten();

        for record in records {
            let Some(ts) = record.get("ts").and_then(Value::as_i64) else {
                continue;
            };
            let Some(data_datetime) = epoch_datetime(ts, request.station_timezone) else {
                continue;
            };

            let atemp = first_present(record, TEMP_FIELDS)
                .map(|v| Measurement::from_json(v, Unit::Fahrenheit));
            let relh =
                first_present(record, HUM_FIELDS).map(|v| Measurement::from_json(v, Unit::Percent));
            let pcpn = RAIN_FIELDS.iter().find_map(|(key, unit)| {
                Measurement::from_field(record.get(*key), *unit)
            });

            if atemp.is_none() && relh.is_none() && pcpn.is_none() {
                continue;
            }

            let reading = groups.entry(&data_datetime);
            if atemp.is_some() {
                reading.atemp = atemp;
            }
            if relh.is_some() {
                reading.relh = relh;
            }
            if pcpn.is_some() {
                reading.pcpn = pcpn;
            }
        }

        groups.into_readings()
    }
}
