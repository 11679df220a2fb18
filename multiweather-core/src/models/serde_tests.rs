//! Serde tests for core types.
//!
//! The envelope is written to disk and consumed by a downstream pipeline, so
//! its field names and enum spellings are part of the contract.

use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use crate::{
    CanonicalReading, CanonicalRequest, Credentials, EnvelopeMetadata, Measurement,
    RequestDebug, ResponseEnvelope, Secret, SpectrumCredentials, StationTimezone, Status, Vendor,
};

fn spectrum_request() -> CanonicalRequest {
    CanonicalRequest::new(
        "29000001",
        Credentials::Spectrum(SpectrumCredentials {
            api_key: Secret::new("key"),
        }),
        Utc.with_ymd_and_hms(2022, 2, 16, 18, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2022, 2, 16, 20, 0, 0).unwrap(),
    )
    .with_timezone(StationTimezone::ET)
}

// ============================================================================
// Vendor Serde Tests
// ============================================================================

#[test]
fn test_vendor_serde_roundtrip_all_variants() {
    for vendor in Vendor::all() {
        let json = serde_json::to_string(vendor).unwrap();
        let back: Vendor = serde_json::from_str(&json).unwrap();
        assert_eq!(*vendor, back, "Round-trip failed for {vendor:?}");
    }
}

#[test]
fn test_vendor_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Vendor::Onset).unwrap(), r#""onset""#);
    assert!(serde_json::from_str::<Vendor>(r#""hobolink""#).is_err());
}

#[test]
fn test_timezone_serializes_code() {
    assert_eq!(serde_json::to_string(&StationTimezone::MT).unwrap(), r#""MT""#);
}

// ============================================================================
// Envelope Serde Tests
// ============================================================================

#[test]
fn test_good_envelope_shape() {
    let request = spectrum_request();
    let issued = Utc.with_ymd_and_hms(2022, 2, 17, 12, 0, 0).unwrap();
    let metadata = EnvelopeMetadata::for_request(&request, issued);

    let mut reading = CanonicalReading::new("29000001", "2022-02-17 07:00:00", "2022-02-16 13:00");
    reading.atemp = Some(Measurement::Value(20.0));
    reading.relh = Some(Measurement::Raw(json!({})));

    let envelope = ResponseEnvelope::good(metadata, 200, json!({"ok": true}), vec![reading]);
    let value = serde_json::to_value(&envelope).unwrap();

    let meta = &value["metadata"];
    assert_eq!(meta["vendor"], "spectrum");
    assert_eq!(meta["station_id"], "29000001");
    assert_eq!(meta["start_datetime"], "2022-02-16 18:00:00");
    assert_eq!(meta["end_datetime"], "2022-02-16 20:00:00");
    assert_eq!(meta["timezone"], "ET");
    assert_eq!(meta["request_time"], "2022-02-17 07:00:00");
    assert_eq!(meta["status"], "GOOD");
    assert_eq!(meta["status_code"], 200);
    assert!(meta.get("error_msg").is_none());

    let parsed = &value["resp_parsed"][0];
    assert_eq!(parsed["atemp"], 20.0);
    assert_eq!(parsed["pcpn"], Value::Null);
    assert_eq!(parsed["relh"], json!({}));
}

#[test]
fn test_error_envelope_shape() {
    let request = spectrum_request();
    let metadata = EnvelopeMetadata::for_request(&request, Utc::now());
    let envelope = ResponseEnvelope::error(metadata, Some(403), "Invalid key", Value::Null);

    assert!(!envelope.is_good());
    assert_eq!(envelope.metadata.status, Status::Error);
    assert!(envelope.resp_parsed.is_empty());

    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value["metadata"]["status"], "ERROR");
    assert_eq!(value["metadata"]["status_code"], 403);
    assert_eq!(value["metadata"]["error_msg"], "Invalid key");
    assert_eq!(value["resp_parsed"], json!([]));
    assert!(value.get("resp_debug").is_none());
}

#[test]
fn test_resp_debug_shape() {
    let request = spectrum_request();
    let metadata = EnvelopeMetadata::for_request(&request, Utc::now());
    let debug = RequestDebug {
        method: "GET".into(),
        endpoint: "https://api.specconnect.net:6703/api/Customer/GetData".into(),
        query: [("customerApiKey".to_string(), "***".to_string())].into(),
        headers: std::collections::BTreeMap::new(),
    };
    let envelope =
        ResponseEnvelope::good(metadata, 200, json!({"ok": true}), Vec::new()).with_debug(debug);

    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value["resp_debug"]["method"], "GET");
    assert_eq!(value["resp_debug"]["query"]["customerApiKey"], "***");
    assert!(value["resp_debug"].get("headers").is_none());

    let back: ResponseEnvelope = serde_json::from_value(value).unwrap();
    assert_eq!(back, envelope);
}

#[test]
fn test_envelope_roundtrip() {
    let request = spectrum_request();
    let metadata = EnvelopeMetadata::for_request(&request, Utc::now());
    let envelope = ResponseEnvelope::good(metadata, 200, json!([1, 2]), Vec::new());

    let text = serde_json::to_string(&envelope).unwrap();
    let back: ResponseEnvelope = serde_json::from_str(&text).unwrap();
    assert_eq!(back, envelope);
}
