//! Onset response normalizer.
//!
//! HOBOlink returns one flat `observation_list` with one entry per sensor
//! sample. Samples are grouped into readings per `(logger_sn, timestamp)`
//! in first-seen order. A sensor feeds a field when its serial matches the
//! `sensor_sn` map, or, without a map entry, when its measurement type
//! matches.

use std::collections::HashMap;

use multiweather_core::{
    CanonicalReading, CanonicalRequest, Measurement, ResponseNormalizer, Unit, Vendor,
};
use serde_json::Value;
use tracing::debug;

use crate::normalize::Field;

fn default_type(field: Field) -> &'static str {
    match field {
        Field::Atemp => "Temperature",
        Field::Pcpn => "Rain",
        Field::Relh => "RH",
    }
}

fn str_field<'a>(obs: &'a Value, key: &str) -> Option<&'a str> {
    obs.get(key).and_then(Value::as_str)
}

/// Maps HOBOlink observations to readings.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnsetNormalizer;

impl OnsetNormalizer {
    fn field_for(request: &CanonicalRequest, obs: &Value) -> Option<Field> {
        let sensor_sn = obs.get("sensor_sn").map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
        let measurement_type = str_field(obs, "sensor_measurement_type");
        let channels = request.vendor_options.channels.as_ref();

        Field::ALL.into_iter().find(|field| {
            let configured = channels.and_then(|m| match field {
                Field::Atemp => m.atemp.as_deref(),
                Field::Pcpn => m.pcpn.as_deref(),
                Field::Relh => m.relh.as_deref(),
            });
            match configured {
                Some(serial) => sensor_sn.as_deref() == Some(serial),
                None => measurement_type == Some(default_type(*field)),
            }
        })
    }
}

impl ResponseNormalizer for OnsetNormalizer {
    fn vendor(&self) -> Vendor {
        Vendor::Onset
    }

    fn normalize(
        &self,
        request: &CanonicalRequest,
        raw: &Value,
        request_datetime: &str,
    ) -> Vec<CanonicalReading> {
        let Some(observations) = raw.get("observation_list").and_then(Value::as_array) else {
            debug!("HOBOlink payload has no observation_list");
            return Vec::new();
        };

        let mut readings: Vec<CanonicalReading> = Vec::new();
        let mut index: HashMap<(String, String), usize> = HashMap::new();

        for obs in observations {
            let Some(timestamp) = str_field(obs, "timestamp") else {
                continue;
            };
            let Some(field) = Self::field_for(request, obs) else {
                continue;
            };
            let logger = str_field(obs, "logger_sn").unwrap_or(&request.station_serial);

            let key = (logger.to_string(), timestamp.to_string());
            let idx = *index.entry(key).or_insert_with(|| {
                readings.push(CanonicalReading::new(logger, request_datetime, timestamp));
                readings.len() - 1
            });

            let unit = str_field(obs, "si_unit").map_or(Unit::Unknown, Unit::from_label);
            let value = Measurement::from_field(obs.get("si_value"), unit);
            let reading = &mut readings[idx];
            match field {
                Field::Atemp => reading.atemp = value,
                Field::Pcpn => reading.pcpn = value,
                Field::Relh => reading.relh = value,
            }
        }

        readings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use multiweather_core::{ChannelMap, Credentials, OnsetCredentials, VendorOptions};
    use serde_json::json;

    fn request(channels: Option<ChannelMap>) -> CanonicalRequest {
        CanonicalRequest::new(
            "21092695",
            Credentials::Onset(OnsetCredentials {
                client_id: "c".into(),
                client_secret: "s".into(),
                user_id: "u".into(),
            }),
            Utc.with_ymd_and_hms(2022, 2, 16, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2022, 2, 16, 2, 0, 0).unwrap(),
        )
        .with_options(VendorOptions {
            channels,
            ..VendorOptions::default()
        })
    }

    fn payload() -> Value {
        json!({"observation_list": [
            {"logger_sn": "21092695", "sensor_sn": "21079936-1", "timestamp": "2022-02-16 00:00:00Z",
             "si_value": 3.5, "si_unit": "°C", "sensor_measurement_type": "Temperature"},
            {"logger_sn": "21092695", "sensor_sn": "21079937-1", "timestamp": "2022-02-16 00:00:00Z",
             "si_value": 0.2, "si_unit": "mm", "sensor_measurement_type": "Rain"},
            {"logger_sn": "21092695", "sensor_sn": "21079938-1", "timestamp": "2022-02-16 00:00:00Z",
             "si_value": 90.1, "si_unit": "%", "sensor_measurement_type": "RH"},
            {"logger_sn": "21092695", "sensor_sn": "21079939-1", "timestamp": "2022-02-16 00:05:00Z",
             "si_value": 1.1, "si_unit": "m/s", "sensor_measurement_type": "Wind Speed"},
            {"logger_sn": "21092695", "sensor_sn": "21079936-1", "timestamp": "2022-02-16 00:05:00Z",
             "si_value": 3.4, "si_unit": "°C", "sensor_measurement_type": "Temperature"}
        ]})
    }

    #[test]
    fn test_groups_by_timestamp_by_type() {
        let readings = OnsetNormalizer.normalize(&request(None), &payload(), "r");
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].station_id, "21092695");
        assert_eq!(readings[0].atemp, Some(Measurement::Value(3.5)));
        assert_eq!(readings[0].pcpn, Some(Measurement::Value(0.2)));
        assert_eq!(readings[0].relh, Some(Measurement::Value(90.1)));
        assert_eq!(readings[1].data_datetime, "2022-02-16 00:05:00Z");
        assert_eq!(readings[1].atemp, Some(Measurement::Value(3.4)));
    }

    #[test]
    fn test_sensor_map_selects_by_serial() {
        let map = ChannelMap {
            atemp: Some("21079939-1".into()),
            ..ChannelMap::default()
        };
        let readings = OnsetNormalizer.normalize(&request(Some(map)), &payload(), "r");
        // The mapped wind sensor now feeds atemp; the temperature sensor is ignored.
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].atemp, None);
        assert_eq!(readings[1].atemp, Some(Measurement::Value(1.1)));
    }
}
