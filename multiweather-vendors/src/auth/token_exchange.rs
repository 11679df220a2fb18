//! Bearer token exchange with caching.
//!
//! The strategy owns its [`TokenCache`], so the cache lives exactly as long
//! as the strategy instance. A [`TokenGrant`] describes the vendor-specific
//! part: which credential keys the cache and how the exchange request looks.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use multiweather_core::{CanonicalRequest, Secret, WeatherError};
use multiweather_fetch::{
    AuthContext, AuthKind, AuthStrategy, Clock, FetchContext, HttpRequest, IssuedToken,
    TokenCache, TransportResponse,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Validity assumed when the token response omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: i64 = 600;

// ============================================================================
// Grant
// ============================================================================

/// Vendor-specific half of a token exchange.
pub trait TokenGrant: Send + Sync {
    /// Key under which the token is cached (one token per client/account).
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Auth`] if the credentials belong to another
    /// vendor.
    fn cache_key(&self, request: &CanonicalRequest) -> Result<String, WeatherError>;

    /// Builds the call to the token endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Auth`] if the credentials belong to another
    /// vendor.
    fn token_request(&self, request: &CanonicalRequest) -> Result<HttpRequest, WeatherError>;
}

// ============================================================================
// Token Response
// ============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<Value>,
}

/// Reads an OAuth-style `{access_token, expires_in}` response.
///
/// # Errors
///
/// Returns [`WeatherError::Auth`] for a non-2xx status or a body without an
/// access token.
pub fn parse_token_response(response: &TransportResponse) -> Result<IssuedToken, WeatherError> {
    if !response.is_success() {
        return Err(WeatherError::auth(format!(
            "token exchange failed with HTTP {}: {}",
            response.status,
            response.error_message()
        )));
    }

    let body: TokenResponse = serde_json::from_str(&response.body)
        .map_err(|e| WeatherError::auth(format!("invalid token response: {e}")))?;

    let access_token = body
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| WeatherError::auth("token response has no access_token"))?;

    let expires_in = match body.expires_in {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|secs| *secs > 0)
    .unwrap_or(DEFAULT_EXPIRES_IN_SECS);

    Ok(IssuedToken {
        access_token: Secret::new(access_token),
        expires_in: Duration::seconds(expires_in),
    })
}

// ============================================================================
// Strategy
// ============================================================================

/// Exchanges credentials for a bearer token, cached until expiry.
pub struct TokenExchangeAuth<G> {
    id: &'static str,
    grant: G,
    cache: TokenCache,
}

impl<G: TokenGrant> TokenExchangeAuth<G> {
    /// Creates a strategy with an empty cache driven by `clock`.
    pub fn new(id: &'static str, grant: G, clock: Arc<dyn Clock>) -> Self {
        Self {
            id,
            grant,
            cache: TokenCache::new(clock),
        }
    }

    /// Returns the token cache.
    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }
}

impl<G> std::fmt::Debug for TokenExchangeAuth<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenExchangeAuth")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<G: TokenGrant> AuthStrategy for TokenExchangeAuth<G> {
    fn id(&self) -> &str {
        self.id
    }

    fn kind(&self) -> AuthKind {
        AuthKind::TokenExchange
    }

    #[instrument(skip_all, fields(strategy = %self.id))]
    async fn produce_auth(
        &self,
        request: &CanonicalRequest,
        ctx: &FetchContext,
    ) -> Result<AuthContext, WeatherError> {
        let key = self.grant.cache_key(request)?;
        let token_request = self.grant.token_request(request)?;
        let transport = Arc::clone(&ctx.transport);

        let token = self
            .cache
            .get_or_refresh(&key, || async move {
                debug!(endpoint = %token_request.endpoint(), "Exchanging credentials for token");
                let response = transport.execute(&token_request).await?;
                parse_token_response(&response).inspect_err(|e| {
                    warn!(status = response.status, error = %e, "Token exchange rejected");
                })
            })
            .await?;

        Ok(AuthContext::Bearer(token))
    }

    async fn invalidate(&self, request: &CanonicalRequest) {
        if let Ok(key) = self.grant.cache_key(request) {
            self.cache.invalidate(&key).await;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
