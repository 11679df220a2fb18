//! HTTP call descriptions and the transport seam.
//!
//! Request builders produce an [`HttpRequest`] value instead of sending
//! anything themselves. A [`Transport`] executes it. Production code uses
//! [`HttpClient`](crate::host::http::HttpClient); tests swap in a stub that
//! records calls and returns scripted responses.

use async_trait::async_trait;
use multiweather_core::{REDACTED, RequestDebug, WeatherError};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use url::Url;

use crate::error::TransportError;

// ============================================================================
// Request
// ============================================================================

/// Query keys and headers whose values are credentials.
const SECRET_NAMES: &[&str] = &[
    "api-key",
    "api-signature",
    "apikey",
    "customerapikey",
    "sid",
    "pid",
    "token",
    "access_token",
    "client_secret",
    "password",
    "user_id",
    "authorization",
];

fn is_secret_name(name: &str) -> bool {
    SECRET_NAMES.iter().any(|s| s.eq_ignore_ascii_case(name))
}

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` pairs.
    Form(Vec<(String, String)>),
    /// JSON document.
    Json(Value),
}

/// A fully built HTTP call: method, URL with query, headers, body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including the encoded query string.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Optional body.
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Creates a GET request.
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Creates a POST request.
    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Parses a URL, mapping failures to a parameter error.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Parameter`] if `url` is not absolute and valid.
    pub fn parse_url(url: &str) -> Result<Url, WeatherError> {
        Url::parse(url).map_err(|e| WeatherError::parameter(format!("invalid URL '{url}': {e}")))
    }

    /// Appends query pairs, percent-encoding values (commas included).
    #[must_use]
    pub fn with_query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        {
            let mut query = self.url.query_pairs_mut();
            for (k, v) in pairs {
                query.append_pair(k.as_ref(), v.as_ref());
            }
        }
        self
    }

    /// Adds a header.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Parameter`] if the value has characters that
    /// are not allowed in a header (usually a malformed credential).
    pub fn with_header(mut self, name: HeaderName, value: &str) -> Result<Self, WeatherError> {
        let value = HeaderValue::from_str(value).map_err(|_| {
            WeatherError::parameter(format!("invalid characters in {name} header value"))
        })?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Adds an `Authorization: Bearer <token>` header.
    ///
    /// # Errors
    ///
    /// See [`HttpRequest::with_header`].
    pub fn with_bearer(self, token: &str) -> Result<Self, WeatherError> {
        self.with_header(AUTHORIZATION, &format!("Bearer {token}"))
    }

    /// Sets a form body.
    #[must_use]
    pub fn with_form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = Some(RequestBody::Form(pairs));
        self
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn with_json(mut self, value: Value) -> Self {
        self.body = Some(RequestBody::Json(value));
        self
    }

    /// Returns the decoded query pairs.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Returns the decoded value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Returns a header value as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the URL without query string, for logging.
    pub fn endpoint(&self) -> String {
        let mut url = self.url.clone();
        url.set_query(None);
        url.to_string()
    }

    /// Describes the call with credential values replaced by [`REDACTED`].
    pub fn debug_info(&self) -> RequestDebug {
        let redact = |name: &str, value: String| {
            if is_secret_name(name) {
                REDACTED.to_string()
            } else {
                value
            }
        };
        RequestDebug {
            method: self.method.to_string(),
            endpoint: self.endpoint(),
            query: self
                .query_pairs()
                .into_iter()
                .map(|(k, v)| {
                    let v = redact(&k, v);
                    (k, v)
                })
                .collect(),
            headers: self
                .headers
                .iter()
                .map(|(name, value)| {
                    let value = value.to_str().unwrap_or_default().to_string();
                    (name.to_string(), redact(name.as_str(), value))
                })
                .collect(),
        }
    }
}

// ============================================================================
// Response
// ============================================================================

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase for the status, when known.
    pub reason: Option<String>,
    /// Response body text.
    pub body: String,
}

impl TransportResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: None,
            body: body.into(),
        }
    }

    /// Sets the reason phrase.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Returns true for 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true for 401 and 403.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status, 401 | 403)
    }

    /// Extracts a human-readable error message.
    ///
    /// Prefers a `message` (or `error`) key in a JSON body, matched
    /// case-insensitively, then the raw body, then the reason phrase.
    pub fn error_message(&self) -> String {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&self.body) {
            for wanted in ["message", "error", "error_description"] {
                let found = map
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(wanted))
                    .map(|(_, v)| v);
                match found {
                    Some(Value::String(s)) => return s.replace('"', ""),
                    Some(other) if !other.is_null() => return other.to_string(),
                    _ => {}
                }
            }
        }
        let body = self.body.trim();
        if !body.is_empty() {
            return body.to_string();
        }
        self.reason
            .clone()
            .unwrap_or_else(|| format!("HTTP {}", self.status))
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Executes HTTP calls.
///
/// Implementations return `Ok` for every response that arrived, whatever its
/// status, and `Err` only when no response was obtained.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes the request.
    async fn execute(&self, request: &HttpRequest) -> Result<TransportResponse, TransportError>;
}

// ============================================================================
// Tests
// ============================================================================
