//! The unified facade.
//!
//! [`WeatherClient::get_reading`] runs one vendor call end to end:
//! validate, authenticate, prepare, build, send, normalize. Caller mistakes
//! (parameters, credentials, zones) come back as `Err`; anything the vendor
//! or the network does at request time is recorded in an ERROR envelope.
//!
//! [`WeatherClient::normalize_payload`] and [`WeatherClient::normalize_file`]
//! run only the normalization half on a payload saved earlier.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use multiweather_core::{
    CanonicalRequest, EnvelopeMetadata, ResponseEnvelope, Vendor, WeatherError,
};
use multiweather_fetch::{FetchContext, TransportResponse};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::descriptor::VendorAdapter;
use crate::params::{ReadingParams, parse_vendor};
use crate::registry::VendorRegistry;

// ============================================================================
// Payload helpers
// ============================================================================

/// Decodes a response body; non-JSON bodies are kept as a string.
fn decode_body(body: &str) -> (Value, bool) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return (Value::Null, true);
    }
    match serde_json::from_str(trimmed) {
        Ok(value) => (value, true),
        Err(_) => (Value::String(body.to_string()), false),
    }
}

fn is_empty_payload(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Some vendors answer 200 with `{"Error": "..."}`.
fn embedded_error(raw: &Value) -> Option<&str> {
    let map = raw.as_object()?;
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("error"))
        .and_then(|(_, v)| v.as_str())
        .filter(|msg| !msg.trim().is_empty())
}

// ============================================================================
// Weather Client
// ============================================================================

/// One entry point for every vendor.
///
/// Holds one adapter per vendor, built once so token caches live as long as
/// the client.
#[derive(Debug)]
pub struct WeatherClient {
    ctx: FetchContext,
    adapters: HashMap<Vendor, VendorAdapter>,
}

impl WeatherClient {
    /// Creates a client with a real HTTP transport restricted to vendor hosts.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Transport`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, WeatherError> {
        let ctx = FetchContext::builder()
            .allowed_domains(VendorRegistry::hosts())
            .build()?;
        Ok(Self::with_context(ctx))
    }

    /// Creates a client over an existing context (custom transport or clock).
    pub fn with_context(ctx: FetchContext) -> Self {
        let adapters = VendorRegistry::all()
            .iter()
            .map(|desc| (desc.id, desc.build_adapter(&ctx)))
            .collect();
        Self { ctx, adapters }
    }

    /// Returns the fetch context.
    pub fn context(&self) -> &FetchContext {
        &self.ctx
    }

    fn adapter(&self, vendor: Vendor) -> Result<&VendorAdapter, WeatherError> {
        self.adapters
            .get(&vendor)
            .ok_or_else(|| WeatherError::parameter(format!("no adapter registered for {vendor}")))
    }

    /// Parses a parameter bag for `vendor_name` and fetches readings.
    ///
    /// # Errors
    ///
    /// See [`ReadingParams::into_request`] and [`WeatherClient::get_reading`].
    pub async fn get_reading_with_params(
        &self,
        vendor_name: &str,
        params: ReadingParams,
    ) -> Result<ResponseEnvelope, WeatherError> {
        let vendor = parse_vendor(vendor_name)?;
        let request = params.into_request(vendor)?;
        self.get_reading(&request).await
    }

    /// Fetches readings for one request.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::Parameter`] when the request fails validation;
    ///   nothing is sent.
    /// - [`WeatherError::Auth`] when credentials are rejected, by the token
    ///   endpoint or by the data endpoint (401/403).
    /// - [`WeatherError::UnknownZone`] is raised earlier, while parsing.
    ///
    /// Transport failures and vendor errors are returned as `Ok` ERROR
    /// envelopes.
    #[instrument(skip(self, request), fields(vendor = %request.vendor(), station = %request.station_serial))]
    pub async fn get_reading(
        &self,
        request: &CanonicalRequest,
    ) -> Result<ResponseEnvelope, WeatherError> {
        let vendor = request.vendor();
        let adapter = self.adapter(vendor)?;

        request.validate()?;
        adapter.builder.validate(request)?;

        let issued_at = self.ctx.clock.now();
        let metadata = EnvelopeMetadata::for_request(request, issued_at);

        let auth = match adapter.auth.produce_auth(request, &self.ctx).await {
            Ok(auth) => auth,
            Err(e) if e.is_recorded() => {
                warn!(error = %e, "Authentication request failed");
                return Ok(ResponseEnvelope::error(metadata, None, e.to_string(), Value::Null));
            }
            Err(e) => return Err(e),
        };
        debug!(strategy = adapter.auth.id(), kind = %auth.kind(), "Auth produced");

        let prepared = match &adapter.preparer {
            Some(preparer) => match preparer.prepare(request, &auth, &self.ctx).await {
                Ok(prepared) => prepared,
                Err(e) if e.is_recorded() => {
                    warn!(preparer = preparer.id(), error = %e, "Request preparation failed");
                    return Ok(ResponseEnvelope::error(
                        metadata,
                        e.status_code(),
                        e.to_string(),
                        Value::Null,
                    ));
                }
                Err(e) => {
                    if matches!(e, WeatherError::Auth(_)) {
                        adapter.auth.invalidate(request).await;
                    }
                    return Err(e);
                }
            },
            None => None,
        };
        let request = prepared.as_ref().unwrap_or(request);

        let http = adapter.builder.build(request, &auth)?;
        let sent = http.debug_info();
        debug!(endpoint = %sent.endpoint, "Sending request");

        let start = Instant::now();
        let response = match self.ctx.transport.execute(&http).await {
            Ok(response) => response,
            Err(e) => {
                let e = WeatherError::from(e);
                warn!(error = %e, "Transport failed");
                return Ok(
                    ResponseEnvelope::error(metadata, None, e.to_string(), Value::Null)
                        .with_debug(sent),
                );
            }
        };
        debug!(
            status = response.status,
            elapsed_ms = start.elapsed().as_millis(),
            "Response received"
        );

        if response.is_auth_failure() {
            adapter.auth.invalidate(request).await;
            return Err(WeatherError::auth(format!(
                "{} rejected the credentials ({}): {}",
                vendor.display_name(),
                response.status,
                response.error_message()
            )));
        }

        Ok(build_envelope(request, adapter, metadata, &response).with_debug(sent))
    }

    /// Normalizes a payload obtained earlier, without any network call.
    ///
    /// An empty payload or one carrying an `Error` key yields an ERROR
    /// envelope. Neither kind of envelope has a status code since no HTTP
    /// exchange took place.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Parameter`] when the request fails validation.
    #[instrument(skip(self, request, raw), fields(vendor = %request.vendor(), station = %request.station_serial))]
    pub fn normalize_payload(
        &self,
        request: &CanonicalRequest,
        raw: Value,
    ) -> Result<ResponseEnvelope, WeatherError> {
        let adapter = self.adapter(request.vendor())?;
        request.validate()?;

        let metadata = EnvelopeMetadata::for_request(request, self.ctx.clock.now());
        if is_empty_payload(&raw) {
            return Ok(ResponseEnvelope::error(metadata, None, "empty response payload", raw));
        }
        if let Some(message) = embedded_error(&raw) {
            let message = message.to_string();
            return Ok(ResponseEnvelope::error(metadata, None, message, raw));
        }

        let parsed = adapter
            .normalizer
            .normalize(request, &raw, &metadata.request_time);
        info!(readings = parsed.len(), "Saved payload normalized");

        let mut envelope = ResponseEnvelope::good(metadata, 0, raw, parsed);
        envelope.metadata.status_code = None;
        Ok(envelope)
    }

    /// Reads a saved JSON payload from `path` and normalizes it.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Parameter`] when the file cannot be read or is
    /// not JSON, and see [`WeatherClient::normalize_payload`].
    pub fn normalize_file(
        &self,
        request: &CanonicalRequest,
        path: &Path,
    ) -> Result<ResponseEnvelope, WeatherError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            WeatherError::parameter(format!("cannot read {}: {e}", path.display()))
        })?;
        let (raw, is_json) = decode_body(&text);
        if !is_json {
            return Err(WeatherError::parameter(format!(
                "{} does not contain JSON",
                path.display()
            )));
        }
        debug!(path = %path.display(), "Loaded saved payload");
        self.normalize_payload(request, raw)
    }
}

/// Classifies a received response into a GOOD or ERROR envelope.
fn build_envelope(
    request: &CanonicalRequest,
    adapter: &VendorAdapter,
    metadata: EnvelopeMetadata,
    response: &TransportResponse,
) -> ResponseEnvelope {
    let status = response.status;
    let (raw, is_json) = decode_body(&response.body);

    if !response.is_success() {
        let message = response.error_message();
        warn!(status, error = %message, "Vendor returned an error");
        return ResponseEnvelope::error(metadata, Some(status), message, raw);
    }
    if !is_json {
        return ResponseEnvelope::error(metadata, Some(status), "response is not JSON", raw);
    }
    if is_empty_payload(&raw) {
        return ResponseEnvelope::error(metadata, Some(status), "empty response payload", raw);
    }
    if let Some(message) = embedded_error(&raw) {
        let message = message.to_string();
        warn!(status, error = %message, "Vendor reported an error");
        return ResponseEnvelope::error(metadata, Some(status), message, raw);
    }

    let parsed = adapter
        .normalizer
        .normalize(request, &raw, &metadata.request_time);
    info!(readings = parsed.len(), "Readings normalized");
    ResponseEnvelope::good(metadata, status, raw, parsed)
}

// ============================================================================
// Tests
// ============================================================================
