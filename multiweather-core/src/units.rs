//! Unit conversion for normalized readings.
//!
//! Vendors declare the unit of each field (explicitly in the payload or
//! implicitly by API contract). Conversion is driven by that declaration,
//! never inferred from the magnitude of a value.

use serde::{Deserialize, Serialize};

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Unit a vendor declares for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Degrees Celsius.
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
    /// Millimeters.
    Millimeters,
    /// Inches.
    Inches,
    /// Percent (relative humidity).
    Percent,
    /// No conversion defined; the value is passed through.
    Unknown,
}

impl Unit {
    /// Parses a vendor unit label such as `" °F"`, `"in"` or `"%"`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().trim_start_matches('°').trim().to_ascii_lowercase();
        match label.as_str() {
            "c" | "degc" | "celsius" => Self::Celsius,
            "f" | "degf" | "fahrenheit" => Self::Fahrenheit,
            "mm" | "millimeters" => Self::Millimeters,
            "in" | "inch" | "inches" => Self::Inches,
            "%" | "rh" | "percent" => Self::Percent,
            _ => Self::Unknown,
        }
    }

    /// Converts a value in this unit to its metric counterpart.
    pub fn to_metric(self, value: f64) -> f64 {
        match self {
            Self::Fahrenheit => fahrenheit_to_celsius(value),
            Self::Inches => inches_to_mm(value),
            Self::Celsius | Self::Millimeters | Self::Percent | Self::Unknown => value,
        }
    }
}

/// Converts Fahrenheit to Celsius: `(F - 32) * 5/9`.
pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

/// Converts inches to millimeters.
pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fahrenheit_to_celsius() {
        assert!((fahrenheit_to_celsius(68.0) - 20.0).abs() < 0.01);
        assert!((fahrenheit_to_celsius(32.0)).abs() < f64::EPSILON);
        assert!((fahrenheit_to_celsius(-40.0) + 40.0).abs() < 0.01);
    }

    #[test]
    fn test_inches_to_mm() {
        assert!((inches_to_mm(1.0) - 25.4).abs() < 0.01);
        assert!((inches_to_mm(0.01) - 0.254).abs() < 0.0001);
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(Unit::from_label(" °F"), Unit::Fahrenheit);
        assert_eq!(Unit::from_label("°C"), Unit::Celsius);
        assert_eq!(Unit::from_label(" mm"), Unit::Millimeters);
        assert_eq!(Unit::from_label("in"), Unit::Inches);
        assert_eq!(Unit::from_label("%"), Unit::Percent);
        assert_eq!(Unit::from_label("kPa"), Unit::Unknown);
    }

    #[test]
    fn test_to_metric_passthrough() {
        assert!((Unit::Unknown.to_metric(1.23) - 1.23).abs() < f64::EPSILON);
        assert!((Unit::Percent.to_metric(55.0) - 55.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round2() {
        assert!((round2(20.004) - 20.0).abs() < f64::EPSILON);
        assert!((round2(25.4449) - 25.44).abs() < f64::EPSILON);
    }
}
