//! Campbell response normalizer.
//!
//! The timeseries payload maps each measurement name to `[[epoch_ms, value], ...]`.
//! Values are already metric.

use multiweather_core::{
    CanonicalReading, CanonicalRequest, Measurement, ReadingGroups, ResponseNormalizer, Unit,
    Vendor,
};
use serde_json::Value;

use super::request::measurement_for;
use crate::normalize::{Field, epoch_datetime};

fn unit(field: Field) -> Unit {
    match field {
        Field::Atemp => Unit::Celsius,
        Field::Pcpn => Unit::Millimeters,
        Field::Relh => Unit::Percent,
    }
}

/// Maps Campbell Cloud timeseries to readings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CampbellNormalizer;

impl ResponseNormalizer for CampbellNormalizer {
    fn vendor(&self) -> Vendor {
        Vendor::Campbell
    }

    fn normalize(
        &self,
        request: &CanonicalRequest,
        raw: &Value,
        request_datetime: &str,
    ) -> Vec<CanonicalReading> {
        let mut groups = ReadingGroups::new(&request.station_serial, request_datetime);

        for field in Field::ALL {
            let name = measurement_for(request, field);
            let Some(points) = raw.get(name).and_then(Value::as_array) else {
                continue;
            };
            for point in points {
                let Some([ts, value]) = point.as_array().map(Vec::as_slice).and_then(|p| p.get(..2))
                else {
                    continue;
                };
                let Some(data_datetime) = ts
                    .as_i64()
                    .and_then(|ms| epoch_datetime(ms.div_euclid(1000), request.station_timezone))
                else {
                    continue;
                };
                let Some(measurement) = Measurement::from_field(Some(value), unit(field)) else {
                    continue;
                };

                let reading = groups.entry(&data_datetime);
                match field {
                    Field::Atemp => reading.atemp = Some(measurement),
                    Field::Pcpn => reading.pcpn = Some(measurement),
                    Field::Relh => reading.relh = Some(measurement),
                }
            }
        }

        groups.into_readings()
    }
}
