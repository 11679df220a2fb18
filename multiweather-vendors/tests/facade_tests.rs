//! Integration tests for the unified facade.

mod common;

use std::sync::Arc;

use chrono::Duration;
use multiweather_core::{Measurement, Status, Vendor, WeatherError};
use multiweather_fetch::{ManualClock, RequestBody};
use multiweather_vendors::{ReadingParams, VendorRegistry};
use serde_json::json;

use common::{StubTransport, at, client};

const NOW: i64 = 1_558_729_481;

const ONSET_TOKEN: &str = r#"{"access_token": "onset-tok", "token_type": "bearer", "expires_in": 600}"#;

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(at(NOW)))
}

/// A complete, valid bag for each vendor.
fn bag(vendor: Vendor) -> ReadingParams {
    let range = ReadingParams::new()
        .with("start_datetime", "2022-02-16 06:00:00")
        .with("end_datetime", "2022-02-16 08:00:00");
    match vendor {
        Vendor::Zentra => range
            .with("sn", "z6-07496")
            .with("token", "zentra-tok")
            .with("tz", "CT"),
        Vendor::Spectrum => range
            .with("sn", "29010118")
            .with("apikey", "spec-key")
            .with("tz", "ET"),
        Vendor::Onset => range
            .with("sn", "21092695")
            .with("client_id", "msu_ws")
            .with("client_secret", "shh")
            .with("user_id", "12345"),
        Vendor::Davis => range
            .with("sn", "117994")
            .with("apikey", "abc123")
            .with("apisec", "xyz987"),
        Vendor::Rainwise => range
            .with("username", "0090C2F000F1")
            .with("mac", "0090C2F000F1")
            .with("sid", "sid-1")
            .with("pid", "sid-1")
            .with("tz", "ET"),
        Vendor::Campbell => range
            .with("station_id", "st-uuid")
            .with("station_lid", "LID42")
            .with("username", "user")
            .with("user_passwd", "pw")
            .with("access_token", "camp-tok")
            .with(
                "measurements",
                "airtemp_c_avg_table5,rain_mm_tot_table5,relhum_avg_table5",
            ),
    }
}

// ============================================================================
// Request construction
// ============================================================================

#[tokio::test]
async fn test_every_vendor_sends_required_wire_params() {
    let expected: &[(Vendor, &[&str])] = &[
        (Vendor::Zentra, &["device_sn", "start_date", "end_date"]),
        (Vendor::Spectrum, &["customerApiKey", "serialNumber", "startDate", "endDate"]),
        (Vendor::Onset, &["loggers", "start_date_time", "end_date_time"]),
        (
            Vendor::Davis,
            &["api-key", "t", "start-timestamp", "end-timestamp", "api-signature"],
        ),
        (
            Vendor::Rainwise,
            &["username", "sid", "pid", "mac", "format", "interval", "sdate", "edate"],
        ),
        (Vendor::Campbell, &[]),
    ];

    for (vendor, keys) in expected {
        let transport = StubTransport::new();
        transport.respond("auth/token", 200, ONSET_TOKEN);
        let client = client(&transport, &clock());

        client
            .get_reading_with_params(vendor.cli_name(), bag(*vendor))
            .await
            .unwrap();

        let http = transport.last_request();
        for key in *keys {
            assert!(
                http.query_value(key).is_some_and(|v| !v.is_empty()),
                "{vendor}: missing {key} in {}",
                http.url
            );
        }
        let host = VendorRegistry::get(*vendor).unwrap().metadata.host;
        assert!(http.url.host_str().unwrap().ends_with(host), "{vendor}");
    }
}

#[tokio::test]
async fn test_vendor_auth_headers() {
    let transport = StubTransport::new();
    transport.respond("auth/token", 200, ONSET_TOKEN);
    let client = client(&transport, &clock());

    client.get_reading_with_params("zentra", bag(Vendor::Zentra)).await.unwrap();
    assert_eq!(
        transport.last_request().header("authorization"),
        Some("Token zentra-tok")
    );

    client.get_reading_with_params("onset", bag(Vendor::Onset)).await.unwrap();
    assert_eq!(
        transport.last_request().header("authorization"),
        Some("Bearer onset-tok")
    );

    client.get_reading_with_params("campbell", bag(Vendor::Campbell)).await.unwrap();
    let http = transport.last_request();
    assert_eq!(http.header("authorization"), Some("Bearer camp-tok"));
    assert!(http.url.path().contains("/LID42/1644991200000/1644998400000/"));
}

#[tokio::test]
async fn test_local_time_vendors_send_station_time() {
    let transport = StubTransport::new();
    let client = client(&transport, &clock());

    client.get_reading_with_params("zentra", bag(Vendor::Zentra)).await.unwrap();
    let http = transport.last_request();
    assert_eq!(http.query_value("start_date").as_deref(), Some("02-16-2022 00:00"));
    assert_eq!(http.query_value("end_date").as_deref(), Some("02-16-2022 02:00"));

    client.get_reading_with_params("rainwise", bag(Vendor::Rainwise)).await.unwrap();
    let http = transport.last_request();
    assert_eq!(http.query_value("sdate").as_deref(), Some("2022-02-16 01:00:00"));
}

#[tokio::test]
async fn test_davis_signature_matches_reference_digest() {
    let transport = StubTransport::new();
    transport.respond("weatherlink.com", 200, r#"{"station_id": 2, "sensors": []}"#);
    let client = client(&transport, &clock());

    let params = ReadingParams::new()
        .with("sn", 2)
        .with("apikey", "abc123")
        .with("apisec", "xyz987")
        .with("start_datetime", "2019-05-23 20:24:41")
        .with("end_datetime", "2019-05-24 20:24:41");
    let envelope = client.get_reading_with_params("davis", params).await.unwrap();
    assert!(envelope.is_good());

    let http = transport.last_request();
    assert_eq!(http.url.path(), "/v2/historic/2");
    assert_eq!(http.query_value("t").as_deref(), Some("1558729481"));
    assert_eq!(
        http.query_value("api-signature").as_deref(),
        Some("f80d9128b7f6210fe3207dfa2d6030ab589c4671e65966ffb55c9381625e5e70")
    );
}

// ============================================================================
// Fail-fast validation
// ============================================================================

#[tokio::test]
async fn test_missing_param_never_reaches_transport() {
    for desc in VendorRegistry::all() {
        for key in desc.required_params() {
            let transport = StubTransport::new();
            let client = client(&transport, &clock());

            let mut params = bag(desc.id);
            params.insert(key, serde_json::Value::Null);
            let err = client
                .get_reading_with_params(desc.cli_name(), params)
                .await
                .unwrap_err();

            assert!(
                matches!(err, WeatherError::Parameter(ref m) if m.contains(key)),
                "{}: dropping {key} gave {err:?}",
                desc.id
            );
            assert_eq!(transport.calls(), 0, "{}: {key}", desc.id);
        }
    }
}

#[tokio::test]
async fn test_rainwise_window_depends_on_interval() {
    let transport = StubTransport::new();
    transport.respond(
        "rainwise.net",
        200,
        r#"{"times": ["2022-02-01 00:00:00"], "temp": [50]}"#,
    );
    let client = client(&transport, &clock());
    let eight_days = || {
        bag(Vendor::Rainwise)
            .with("start_datetime", "2022-02-01 05:00:00")
            .with("end_datetime", "2022-02-09 05:00:00")
    };

    let err = client
        .get_reading_with_params("rainwise", eight_days().with("interval", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Parameter(_)));
    assert_eq!(transport.calls(), 0);

    let envelope = client
        .get_reading_with_params("rainwise", eight_days().with("interval", "15"))
        .await
        .unwrap();
    assert!(envelope.is_good());
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_onset_rejects_eleven_loggers() {
    let transport = StubTransport::new();
    let client = client(&transport, &clock());
    let loggers: Vec<String> = (0..11).map(|i| format!("2109269{i}")).collect();

    let err = client
        .get_reading_with_params("onset", bag(Vendor::Onset).with("sn", loggers))
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Parameter(ref m) if m.contains("10")));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_unknown_vendor_and_zone() {
    let transport = StubTransport::new();
    let client = client(&transport, &clock());

    let err = client
        .get_reading_with_params("metos", bag(Vendor::Davis))
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Parameter(_)));

    let err = client
        .get_reading_with_params("ZENTRA", bag(Vendor::Zentra).with("tz", "CEST"))
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::UnknownZone(ref z) if z == "CEST"));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_inverted_range_rejected() {
    let transport = StubTransport::new();
    let client = client(&transport, &clock());
    let params = bag(Vendor::Davis)
        .with("start_datetime", "2022-02-16 08:00:00")
        .with("end_datetime", "2022-02-16 06:00:00");

    let err = client.get_reading_with_params("davis", params).await.unwrap_err();
    assert!(matches!(err, WeatherError::Parameter(_)));
    assert_eq!(transport.calls(), 0);
}

// ============================================================================
// Envelopes
// ============================================================================

#[tokio::test]
async fn test_rainwise_payload_converted_to_metric() {
    let transport = StubTransport::new();
    transport.respond(
        "rainwise.net",
        200,
        r#"{"station_id": "0090C2F000F1",
            "times": ["2022-02-16 01:00:00", "2022-02-16 01:15:00"],
            "temp": ["68.0", "32.0"], "precip": ["1.00", "0.00"], "hum": ["45", "50"]}"#,
    );
    let client = client(&transport, &clock());

    let envelope = client
        .get_reading_with_params("rainwise", bag(Vendor::Rainwise))
        .await
        .unwrap();

    assert_eq!(envelope.metadata.status, Status::Good);
    assert_eq!(envelope.metadata.status_code, Some(200));
    assert_eq!(envelope.resp_parsed.len(), 2);
    let first = &envelope.resp_parsed[0];
    assert_eq!(first.station_id, "0090C2F000F1");
    assert_eq!(first.atemp, Some(Measurement::Value(20.0)));
    assert_eq!(first.pcpn, Some(Measurement::Value(25.4)));
    assert_eq!(envelope.resp_raw["temp"][0], json!("68.0"));
}

#[tokio::test]
async fn test_non_2xx_becomes_error_envelope() {
    let transport = StubTransport::new();
    transport.respond("zentracloud.com", 500, r#"{"message": "internal failure"}"#);
    let client = client(&transport, &clock());

    let envelope = client
        .get_reading_with_params("zentra", bag(Vendor::Zentra))
        .await
        .unwrap();

    assert_eq!(envelope.metadata.status, Status::Error);
    assert_eq!(envelope.metadata.status_code, Some(500));
    assert_eq!(envelope.metadata.error_msg.as_deref(), Some("internal failure"));
    assert!(envelope.resp_parsed.is_empty());
    assert_eq!(envelope.metadata.vendor, Vendor::Zentra);
    assert_eq!(envelope.metadata.station_id, "z6-07496");
}

#[tokio::test]
async fn test_empty_and_embedded_error_payloads() {
    let transport = StubTransport::new();
    let client = client(&transport, &clock());

    transport.respond("specconnect.net", 200, "[]");
    let envelope = client
        .get_reading_with_params("spectrum", bag(Vendor::Spectrum))
        .await
        .unwrap();
    assert!(!envelope.is_good());
    assert_eq!(envelope.metadata.status_code, Some(200));

    transport.respond(
        "specconnect.net",
        200,
        r#"{"Error": "Device serial number entered does not exist"}"#,
    );
    let envelope = client
        .get_reading_with_params("spectrum", bag(Vendor::Spectrum))
        .await
        .unwrap();
    assert_eq!(
        envelope.metadata.error_msg.as_deref(),
        Some("Device serial number entered does not exist")
    );
}

#[tokio::test]
async fn test_timeout_recorded_in_envelope() {
    let transport = StubTransport::new();
    transport.time_out("weatherlink.com");
    let client = client(&transport, &clock());

    let envelope = client
        .get_reading_with_params("davis", bag(Vendor::Davis))
        .await
        .unwrap();
    assert_eq!(envelope.metadata.status, Status::Error);
    assert_eq!(envelope.metadata.status_code, None);
    assert!(envelope.metadata.error_msg.is_some());
    assert!(envelope.resp_raw.is_null());
    assert!(envelope.resp_debug.unwrap().endpoint.contains("weatherlink.com"));
}

#[tokio::test]
async fn test_request_time_in_station_zone() {
    let transport = StubTransport::new();
    let client = client(&transport, &clock());

    let envelope = client
        .get_reading_with_params("rainwise", bag(Vendor::Rainwise))
        .await
        .unwrap();
    // 1558729481 is 2019-05-24 20:24:41 UTC, EDT is UTC-4
    assert_eq!(envelope.metadata.request_time, "2019-05-24 16:24:41");

    let envelope = client
        .get_reading_with_params("davis", bag(Vendor::Davis))
        .await
        .unwrap();
    assert_eq!(envelope.metadata.request_time, "2019-05-24 20:24:41");
}

#[tokio::test]
async fn test_resp_debug_describes_call_without_secrets() {
    let secrets = ["zentra-tok", "spec-key", "onset-tok", "shh", "abc123", "xyz987", "sid-1", "camp-tok"];

    for &vendor in Vendor::all() {
        let transport = StubTransport::new();
        transport.respond("auth/token", 200, ONSET_TOKEN);
        let client = client(&transport, &clock());

        let envelope = client
            .get_reading_with_params(vendor.cli_name(), bag(vendor))
            .await
            .unwrap();

        let http = transport.last_request();
        let debug = envelope.resp_debug.as_ref().unwrap();
        assert_eq!(debug.method, "GET", "{vendor}");
        assert_eq!(debug.endpoint, http.endpoint(), "{vendor}");
        assert_eq!(debug.query.len(), http.query_pairs().len(), "{vendor}");

        let text = serde_json::to_string(&envelope).unwrap();
        for secret in secrets {
            assert!(!text.contains(secret), "{vendor}: {secret} leaked");
        }
        if let Some(signature) = http.query_value("api-signature") {
            assert!(!text.contains(&signature), "{vendor}: signature leaked");
        }
    }
}

// ============================================================================
// Saved payloads
// ============================================================================

const CAMPBELL_PAYLOAD: &str =
    r#"{"airtemp_c_avg_table5": [[1644991200000, 1.5]], "relhum_avg_table5": [[1644991200000, 70]]}"#;

#[test]
fn test_normalize_payload_makes_no_calls() {
    let transport = StubTransport::new();
    let client = client(&transport, &clock());
    let request = bag(Vendor::Campbell).into_request(Vendor::Campbell).unwrap();
    let raw: serde_json::Value = serde_json::from_str(CAMPBELL_PAYLOAD).unwrap();

    let envelope = client.normalize_payload(&request, raw.clone()).unwrap();
    assert!(envelope.is_good());
    assert_eq!(envelope.metadata.status_code, None);
    assert_eq!(envelope.metadata.station_id, "st-uuid");
    assert_eq!(envelope.resp_raw, raw);
    assert_eq!(envelope.resp_parsed[0].atemp, Some(Measurement::Value(1.5)));
    assert!(envelope.resp_debug.is_none());

    let envelope = client.normalize_payload(&request, json!({})).unwrap();
    assert_eq!(envelope.metadata.status, Status::Error);
    assert_eq!(envelope.metadata.error_msg.as_deref(), Some("empty response payload"));

    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_normalize_file() {
    let transport = StubTransport::new();
    let client = client(&transport, &clock());
    let request = bag(Vendor::Campbell).into_request(Vendor::Campbell).unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("campbell.json");
    std::fs::write(&path, CAMPBELL_PAYLOAD).unwrap();

    let envelope = client.normalize_file(&request, &path).unwrap();
    assert!(envelope.is_good());
    assert_eq!(envelope.resp_parsed[0].relh, Some(Measurement::Value(70.0)));

    let missing = client.normalize_file(&request, &dir.path().join("nope.json"));
    assert!(matches!(missing, Err(WeatherError::Parameter(_))));

    std::fs::write(&path, "<html>").unwrap();
    let not_json = client.normalize_file(&request, &path);
    assert!(matches!(not_json, Err(WeatherError::Parameter(_))));

    assert_eq!(transport.calls(), 0);
}

// ============================================================================
// Token lifecycle
// ============================================================================

#[tokio::test]
async fn test_onset_token_exchanged_once_until_expiry() {
    let transport = StubTransport::new();
    transport.respond("auth/token", 200, ONSET_TOKEN);
    transport.respond(
        "ws/data/file",
        200,
        r#"{"observation_list": [{"logger_sn": "21092695", "sensor_sn": "1",
            "timestamp": "2022-02-16 06:00:00Z", "si_value": 3.5, "si_unit": "°C",
            "sensor_measurement_type": "Temperature"}]}"#,
    );
    let clock = clock();
    let client = client(&transport, &clock);

    for _ in 0..2 {
        let envelope = client
            .get_reading_with_params("onset", bag(Vendor::Onset))
            .await
            .unwrap();
        assert!(envelope.is_good());
        assert_eq!(envelope.resp_parsed[0].atemp, Some(Measurement::Value(3.5)));
    }
    assert_eq!(transport.calls_to("auth/token"), 1);
    assert_eq!(transport.calls_to("ws/data/file"), 2);

    let token_call = &transport.requests()[0];
    let Some(RequestBody::Form(form)) = &token_call.body else {
        panic!("token exchange should post a form");
    };
    assert!(form.contains(&("grant_type".to_string(), "client_credentials".to_string())));

    clock.advance(Duration::seconds(600));
    client
        .get_reading_with_params("onset", bag(Vendor::Onset))
        .await
        .unwrap();
    assert_eq!(transport.calls_to("auth/token"), 2);
}

#[tokio::test]
async fn test_data_401_invalidates_token_and_raises() {
    let transport = StubTransport::new();
    transport.respond("auth/token", 200, ONSET_TOKEN);
    transport.respond("ws/data/file", 401, r#"{"error": "invalid_token"}"#);
    let client = client(&transport, &clock());

    let err = client
        .get_reading_with_params("onset", bag(Vendor::Onset))
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Auth(ref m) if m.contains("invalid_token")));

    transport.respond("ws/data/file", 200, r#"{"observation_list": []}"#);
    client
        .get_reading_with_params("onset", bag(Vendor::Onset))
        .await
        .unwrap();
    assert_eq!(transport.calls_to("auth/token"), 2);
}

#[tokio::test]
async fn test_token_endpoint_rejection_raises_auth() {
    let transport = StubTransport::new();
    transport.respond("auth/token", 400, r#"{"error_description": "bad client secret"}"#);
    let client = client(&transport, &clock());

    let err = client
        .get_reading_with_params("onset", bag(Vendor::Onset))
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Auth(ref m) if m.contains("bad client secret")));
    assert_eq!(transport.calls_to("ws/data/file"), 0);
}

#[tokio::test]
async fn test_token_endpoint_timeout_recorded() {
    let transport = StubTransport::new();
    transport.time_out("auth/token");
    let client = client(&transport, &clock());

    let envelope = client
        .get_reading_with_params("onset", bag(Vendor::Onset))
        .await
        .unwrap();
    assert!(!envelope.is_good());
    assert!(envelope.resp_debug.is_none());
    assert_eq!(transport.calls_to("ws/data/file"), 0);
}

#[tokio::test]
async fn test_campbell_password_grant() {
    let transport = StubTransport::new();
    transport.respond("campbell-cloud/tokens", 200, r#"{"access_token": "granted", "expires_in": 3600}"#);
    transport.respond(
        "measurement/timeseries",
        200,
        r#"{"airtemp_c_avg_table5": [[1644991200000, 1.5]], "relhum_avg_table5": [[1644991200000, 70]]}"#,
    );
    let client = client(&transport, &clock());
    let mut params = bag(Vendor::Campbell);
    params.insert("access_token", serde_json::Value::Null);

    for _ in 0..2 {
        let envelope = client
            .get_reading_with_params("campbell", params.clone())
            .await
            .unwrap();
        assert!(envelope.is_good());
        let reading = &envelope.resp_parsed[0];
        assert_eq!(reading.station_id, "st-uuid");
        assert_eq!(reading.data_datetime, "2022-02-16 06:00:00");
        assert_eq!(reading.relh, Some(Measurement::Value(70.0)));
    }
    assert_eq!(transport.calls_to("campbell-cloud/tokens"), 1);

    let token_call = &transport.requests()[0];
    assert_eq!(
        token_call.body,
        Some(RequestBody::Json(json!({
            "grant_type": "password",
            "credentials": {"username": "user", "password": "pw"}
        })))
    );
    assert_eq!(
        transport.last_request().header("authorization"),
        Some("Bearer granted")
    );
}

// ============================================================================
// Campbell measurement discovery
// ============================================================================

fn discovery_params() -> ReadingParams {
    let mut params = bag(Vendor::Campbell);
    params.insert("station_id", "STATION-UUID-XYZ");
    params.insert("measurements", serde_json::Value::Null);
    params
}

#[tokio::test]
async fn test_campbell_discovers_measurements_once_per_station() {
    let transport = StubTransport::new();
    transport.respond(
        "user/session",
        200,
        r#"{"kc_id": "kc-1", "organization_id": "ORG-1"}"#,
    );
    transport.respond(
        "/definitions",
        200,
        r#"[{"name": "BattV_Min"}, {"name": "AirTC_Avg"}, {"name": "Rain_mm_Tot"}, {"name": "RH"}]"#,
    );
    transport.respond(
        "measurement/timeseries",
        200,
        r#"{"AirTC_Avg": [[1644991200000, 2.5]], "RH": [[1644991200000, 81]], "BattV_Min": [[1644991200000, 12.6]]}"#,
    );
    let client = client(&transport, &clock());

    for _ in 0..2 {
        let envelope = client
            .get_reading_with_params("campbell", discovery_params())
            .await
            .unwrap();
        assert!(envelope.is_good());
        let reading = &envelope.resp_parsed[0];
        assert_eq!(reading.station_id, "STATION-UUID-XYZ");
        assert_eq!(reading.atemp, Some(Measurement::Value(2.5)));
        assert_eq!(reading.relh, Some(Measurement::Value(81.0)));
        assert_eq!(reading.pcpn, None);
    }
    assert_eq!(transport.calls_to("api_v2/user/session"), 1);
    assert_eq!(transport.calls_to("/definitions"), 1);

    let requests = transport.requests();
    let session = &requests[0];
    assert_eq!(session.header("authorization"), Some("Bearer camp-tok"));
    let definitions = &requests[1];
    assert_eq!(
        definitions.url.path(),
        "/v3/campbell-cloud/organizations/ORG-1/stations/STATION-UUID-XYZ/definitions"
    );
    assert_eq!(definitions.query_value("brief").as_deref(), Some("true"));
    assert_eq!(definitions.header("authorization"), Some("Bearer camp-tok"));

    let timeseries = transport.last_request();
    assert!(
        timeseries
            .url
            .path()
            .ends_with("/LID42/1644991200000/1644998400000/BattV_Min,AirTC_Avg,Rain_mm_Tot,RH"),
        "{}",
        timeseries.url
    );
}

#[tokio::test]
async fn test_campbell_explicit_measurements_skip_discovery() {
    let transport = StubTransport::new();
    let client = client(&transport, &clock());

    client
        .get_reading_with_params("campbell", bag(Vendor::Campbell))
        .await
        .unwrap();
    assert_eq!(transport.calls_to("user/session"), 0);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_campbell_discovery_failure_recorded() {
    let transport = StubTransport::new();
    transport.respond("user/session", 500, r#"{"message": "session store down"}"#);
    let client = client(&transport, &clock());

    let envelope = client
        .get_reading_with_params("campbell", discovery_params())
        .await
        .unwrap();
    assert_eq!(envelope.metadata.status, Status::Error);
    assert_eq!(envelope.metadata.status_code, Some(500));
    assert!(envelope.metadata.error_msg.unwrap().contains("session store down"));
    assert_eq!(transport.calls_to("measurement/timeseries"), 0);

    transport.respond("user/session", 401, r#"{"message": "expired"}"#);
    let err = client
        .get_reading_with_params("campbell", discovery_params())
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Auth(_)));
}
