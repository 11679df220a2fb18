//! Spectrum response normalizer.
//!
//! Each `EquipmentRecords[]` entry becomes one reading. Sensor values arrive
//! under `SensorData[]` keyed by `SensorType`, in °F and inches unless a
//! `Unit` says otherwise.

use multiweather_core::{
    CanonicalReading, CanonicalRequest, Measurement, ResponseNormalizer, Unit, Vendor,
};
use serde_json::Value;

use crate::normalize::{Field, channel};

fn default_channel(field: Field) -> &'static str {
    match field {
        Field::Atemp => "Temperature",
        Field::Pcpn => "Rainfall",
        Field::Relh => "Relative Humidity",
    }
}

fn default_unit(field: Field) -> Unit {
    match field {
        Field::Atemp => Unit::Fahrenheit,
        Field::Pcpn => Unit::Inches,
        Field::Relh => Unit::Percent,
    }
}

fn timestamp(sensor: &Value) -> Option<&str> {
    sensor
        .get("FormattedTimeStamp")
        .or_else(|| sensor.get("TimeStamp"))
        .and_then(Value::as_str)
}

/// Maps SpecConnect equipment records to readings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectrumNormalizer;

impl ResponseNormalizer for SpectrumNormalizer {
    fn vendor(&self) -> Vendor {
        Vendor::Spectrum
    }

    fn normalize(
        &self,
        request: &CanonicalRequest,
        raw: &Value,
        request_datetime: &str,
    ) -> Vec<CanonicalReading> {
        let channels = request.vendor_options.channels.as_ref();
        let records = raw.get("EquipmentRecords").and_then(Value::as_array);

        records
            .into_iter()
            .flatten()
            .filter_map(|record| {
                let sensors = record.get("SensorData").and_then(Value::as_array)?;
                let find = |field: Field| {
                    let name = channel(channels, field, default_channel(field));
                    sensors
                        .iter()
                        .find(|s| s.get("SensorType").and_then(Value::as_str) == Some(name))
                };

                let data_datetime = find(Field::Atemp)
                    .and_then(timestamp)
                    .or_else(|| sensors.iter().find_map(timestamp))
                    .or_else(|| timestamp(record))
                    .unwrap_or_default();

                let mut reading = CanonicalReading::new(
                    &request.station_serial,
                    request_datetime,
                    data_datetime,
                );
                for field in Field::ALL {
                    let Some(sensor) = find(field) else { continue };
                    let unit = sensor
                        .get("Unit")
                        .and_then(Value::as_str)
                        .map_or(default_unit(field), Unit::from_label);
                    let value = Measurement::from_field(sensor.get("Value"), unit);
                    match field {
                        Field::Atemp => reading.atemp = value,
                        Field::Pcpn => reading.pcpn = value,
                        Field::Relh => reading.relh = value,
                    }
                }
                Some(reading)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use multiweather_core::{ChannelMap, Credentials, SpectrumCredentials, VendorOptions};
    use serde_json::json;

    fn request(options: VendorOptions) -> CanonicalRequest {
        CanonicalRequest::new(
            "30K1001",
            Credentials::Spectrum(SpectrumCredentials { api_key: "k".into() }),
            Utc.with_ymd_and_hms(2022, 2, 16, 5, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2022, 2, 16, 7, 0, 0).unwrap(),
        )
        .with_options(options)
    }

    fn payload() -> Value {
        json!({"EquipmentRecords": [
            {"SensorData": [
                {"SensorType": "Temperature", "Value": "68.0", "Unit": "°F",
                 "FormattedTimeStamp": "2022-02-16 00:00"},
                {"SensorType": "Rainfall", "Value": 0.1, "FormattedTimeStamp": "2022-02-16 00:00"},
                {"SensorType": "Relative Humidity", "Value": 55, "Unit": "%",
                 "FormattedTimeStamp": "2022-02-16 00:00"}
            ]},
            {"SensorData": [
                {"SensorType": "Temperature", "Value": "n/a", "FormattedTimeStamp": "2022-02-16 00:15"},
                {"SensorType": "Soil Moisture", "Value": 12.0, "Unit": "%"}
            ]}
        ]})
    }

    #[test]
    fn test_one_reading_per_record() {
        let readings = SpectrumNormalizer.normalize(&request(VendorOptions::default()), &payload(), "r");
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].data_datetime, "2022-02-16 00:00");
        assert_eq!(readings[0].atemp, Some(Measurement::Value(20.0)));
        assert_eq!(readings[0].pcpn, Some(Measurement::Value(2.54)));
        assert_eq!(readings[0].relh, Some(Measurement::Value(55.0)));
        assert_eq!(readings[1].data_datetime, "2022-02-16 00:15");
        assert_eq!(readings[1].atemp, Some(Measurement::Raw(json!("n/a"))));
        assert_eq!(readings[1].relh, None);
    }

    #[test]
    fn test_channel_map_overrides_sensor_type() {
        let options = VendorOptions {
            channels: Some(ChannelMap {
                relh: Some("Soil Moisture".into()),
                ..ChannelMap::default()
            }),
            ..VendorOptions::default()
        };
        let readings = SpectrumNormalizer.normalize(&request(options), &payload(), "r");
        assert_eq!(readings[1].relh, Some(Measurement::Value(12.0)));
    }
}
