//! HTTP client with tracing, timeout, and domain allowlist.
//!
//! This module provides the reqwest-backed [`Transport`]:
//! - Request/response tracing
//! - Domain allowlist (vendor hosts only)
//! - Timeout classification into [`TransportError::Timeout`]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::error::TransportError;
use crate::transport::{HttpRequest, RequestBody, Transport, TransportResponse};

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for multiweather.
const USER_AGENT: &str = concat!("multiweather/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing, timeout, and domain allowlist.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    timeout: Duration,
    allowed_domains: Option<Vec<String>>,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] if the TLS backend cannot be
    /// initialised.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] if the TLS backend cannot be
    /// initialised.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let inner = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;

        Ok(Self {
            inner,
            timeout,
            allowed_domains: None,
        })
    }

    /// Restricts requests to the given domains and their subdomains.
    #[must_use]
    pub fn allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Returns the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &url::Url) -> Result<(), TransportError> {
        let Some(ref allowed) = self.allowed_domains else {
            return Ok(()); // No restrictions
        };

        let host = url
            .host_str()
            .ok_or_else(|| TransportError::InvalidUrl("No host in URL".to_string()))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(TransportError::DomainNotAllowed(host.to_string()))
        }
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err)
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.endpoint()))]
    async fn execute(&self, request: &HttpRequest) -> Result<TransportResponse, TransportError> {
        self.is_domain_allowed(&request.url)?;
        debug!("Sending request");

        let mut builder = self
            .inner
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());

        builder = match &request.body {
            Some(RequestBody::Form(pairs)) => builder.form(pairs),
            Some(RequestBody::Json(value)) => builder.json(value),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            let err = self.classify(e);
            warn!(error = %err, "Request failed");
            err
        })?;

        let status = response.status();
        debug!(status = %status, "Response received");

        let body = response.text().await.map_err(|e| self.classify(e))?;

        Ok(TransportResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(String::from),
            body,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
