//! Canonical reading records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::units::{Unit, round2};

// ============================================================================
// Measurement
// ============================================================================

/// One normalized field value.
///
/// Values with a known unit are converted to metric and rounded to two
/// decimals. Anything that cannot be read as a number (an empty object, a
/// non-numeric string) is kept verbatim so one corrupt leaf does not sink
/// the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    /// Numeric metric value.
    Value(f64),
    /// Vendor leaf passed through unconverted.
    Raw(Value),
}

impl Measurement {
    /// Builds a measurement from a vendor leaf in the given unit.
    ///
    /// Returns `None` for an absent or `null` leaf.
    pub fn from_field(value: Option<&Value>, unit: Unit) -> Option<Self> {
        match value {
            None | Some(Value::Null) => None,
            Some(v) => Some(Self::from_json(v, unit)),
        }
    }

    /// Builds a measurement from a present vendor leaf.
    pub fn from_json(value: &Value, unit: Unit) -> Self {
        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) if unit != Unit::Unknown => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match number {
            Some(n) if unit == Unit::Unknown => Self::Value(n),
            Some(n) => Self::Value(round2(unit.to_metric(n))),
            None => Self::Raw(value.clone()),
        }
    }

    /// Returns the numeric value, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Raw(_) => None,
        }
    }
}

// ============================================================================
// Canonical Reading
// ============================================================================

/// A normalized per-timestamp reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalReading {
    /// Station identifier.
    pub station_id: String,
    /// When the request was issued (station-local when known).
    pub request_datetime: String,
    /// When the measurement was taken, as the vendor reported it.
    pub data_datetime: String,
    /// Air temperature in Celsius.
    pub atemp: Option<Measurement>,
    /// Precipitation in millimeters.
    pub pcpn: Option<Measurement>,
    /// Relative humidity in percent.
    pub relh: Option<Measurement>,
}

impl CanonicalReading {
    /// Creates an empty reading for the given timestamp.
    pub fn new(
        station_id: impl Into<String>,
        request_datetime: impl Into<String>,
        data_datetime: impl Into<String>,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            request_datetime: request_datetime.into(),
            data_datetime: data_datetime.into(),
            atemp: None,
            pcpn: None,
            relh: None,
        }
    }

    /// Returns true if no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.atemp.is_none() && self.pcpn.is_none() && self.relh.is_none()
    }
}

// ============================================================================
// Reading Groups
// ============================================================================

/// Collects channel values into one reading per timestamp.
///
/// Vendors that report one series per sensor need their values merged by
/// timestamp. Readings come out in the order each timestamp was first seen,
/// which keeps the vendor's native ordering.
#[derive(Debug)]
pub struct ReadingGroups {
    station_id: String,
    request_datetime: String,
    readings: Vec<CanonicalReading>,
    index: HashMap<String, usize>,
}

impl ReadingGroups {
    /// Creates an empty collection.
    pub fn new(station_id: impl Into<String>, request_datetime: impl Into<String>) -> Self {
        Self {
            station_id: station_id.into(),
            request_datetime: request_datetime.into(),
            readings: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns the reading for a timestamp, creating it on first sight.
    pub fn entry(&mut self, data_datetime: &str) -> &mut CanonicalReading {
        let idx = match self.index.get(data_datetime) {
            Some(idx) => *idx,
            None => {
                self.readings.push(CanonicalReading::new(
                    self.station_id.clone(),
                    self.request_datetime.clone(),
                    data_datetime,
                ));
                let idx = self.readings.len() - 1;
                self.index.insert(data_datetime.to_string(), idx);
                idx
            }
        };
        &mut self.readings[idx]
    }

    /// Returns the collected readings in first-seen order.
    pub fn into_readings(self) -> Vec<CanonicalReading> {
        self.readings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_measurement_converts_numbers_and_strings() {
        let m = Measurement::from_json(&json!(68.0), Unit::Fahrenheit);
        assert_eq!(m, Measurement::Value(20.0));
        let m = Measurement::from_json(&json!("1.00"), Unit::Inches);
        assert_eq!(m, Measurement::Value(25.4));
    }

    #[test]
    fn test_measurement_passes_malformed_through() {
        let m = Measurement::from_json(&json!({}), Unit::Fahrenheit);
        assert_eq!(m, Measurement::Raw(json!({})));
        let m = Measurement::from_json(&json!("n/a"), Unit::Celsius);
        assert_eq!(m, Measurement::Raw(json!("n/a")));
    }

    #[test]
    fn test_measurement_unknown_unit_keeps_strings() {
        let m = Measurement::from_json(&json!("45"), Unit::Unknown);
        assert_eq!(m, Measurement::Raw(json!("45")));
        let m = Measurement::from_json(&json!(45.123), Unit::Unknown);
        assert_eq!(m, Measurement::Value(45.123));
    }

    #[test]
    fn test_measurement_absent() {
        assert!(Measurement::from_field(None, Unit::Celsius).is_none());
        assert!(Measurement::from_field(Some(&Value::Null), Unit::Celsius).is_none());
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let mut groups = ReadingGroups::new("st", "2022-01-01 00:00:00");
        groups.entry("10:00").atemp = Some(Measurement::Value(1.0));
        groups.entry("09:00").atemp = Some(Measurement::Value(2.0));
        groups.entry("10:00").relh = Some(Measurement::Value(50.0));

        let readings = groups.into_readings();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].data_datetime, "10:00");
        assert_eq!(readings[0].relh, Some(Measurement::Value(50.0)));
        assert_eq!(readings[1].data_datetime, "09:00");
    }
}
