//! Rainwise response normalizer.
//!
//! The historical payload is a set of parallel arrays indexed like `times`:
//! `temp` (°F), `precip` (inches) and `hum` (percent, passed through as
//! reported).

use multiweather_core::{
    CanonicalReading, CanonicalRequest, Measurement, ResponseNormalizer, Unit, Vendor,
};
use serde_json::Value;

fn series<'a>(raw: &'a Value, key: &str) -> &'a [Value] {
    raw.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn station_id(raw: &Value, fallback: &str) -> String {
    match raw.get("station_id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => fallback.to_string(),
    }
}

/// Maps Rainwise parallel arrays to readings.
#[derive(Debug, Clone, Copy, Default)]
pub struct RainwiseNormalizer;

impl ResponseNormalizer for RainwiseNormalizer {
    fn vendor(&self) -> Vendor {
        Vendor::Rainwise
    }

    fn normalize(
        &self,
        request: &CanonicalRequest,
        raw: &Value,
        request_datetime: &str,
    ) -> Vec<CanonicalReading> {
        let station = station_id(raw, &request.station_serial);
        let temp = series(raw, "temp");
        let precip = series(raw, "precip");
        let hum = series(raw, "hum");

        series(raw, "times")
            .iter()
            .enumerate()
            .filter_map(|(i, time)| {
                let data_datetime = match time {
                    Value::String(s) => s.clone(),
                    Value::Null => return None,
                    other => other.to_string(),
                };
                let mut reading =
                    CanonicalReading::new(station.clone(), request_datetime, data_datetime);
                reading.atemp = Measurement::from_field(temp.get(i), Unit::Fahrenheit);
                reading.pcpn = Measurement::from_field(precip.get(i), Unit::Inches);
                reading.relh = Measurement::from_field(hum.get(i), Unit::Unknown);
                Some(reading)
            })
            .collect()
    }
}
