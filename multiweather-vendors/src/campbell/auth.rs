//! Campbell Cloud auth: pre-issued token or password grant.

use std::sync::Arc;

use async_trait::async_trait;
use multiweather_core::{CampbellCredentials, CanonicalRequest, Credentials, WeatherError};
use multiweather_fetch::{AuthContext, AuthKind, AuthStrategy, Clock, FetchContext, HttpRequest};
use serde_json::json;

use crate::auth::{StaticKeyAuth, TokenExchangeAuth, TokenGrant};

/// Token endpoint.
pub const TOKEN_URL: &str = "https://api.campbellcloud.io/v3/campbell-cloud/tokens";

fn credentials(request: &CanonicalRequest) -> Result<&CampbellCredentials, WeatherError> {
    match &request.credentials {
        Credentials::Campbell(creds) => Ok(creds),
        other => Err(WeatherError::auth(format!(
            "{} credentials cannot be exchanged for a Campbell Cloud token",
            other.vendor().display_name()
        ))),
    }
}

/// JSON password grant, cached per username.
#[derive(Debug, Clone, Copy, Default)]
pub struct CampbellGrant;

impl TokenGrant for CampbellGrant {
    fn cache_key(&self, request: &CanonicalRequest) -> Result<String, WeatherError> {
        Ok(format!("campbell:{}", credentials(request)?.username))
    }

    fn token_request(&self, request: &CanonicalRequest) -> Result<HttpRequest, WeatherError> {
        let creds = credentials(request)?;
        Ok(
            HttpRequest::post(HttpRequest::parse_url(TOKEN_URL)?).with_json(json!({
                "grant_type": "password",
                "credentials": {
                    "username": creds.username,
                    "password": creds.password.expose(),
                },
            })),
        )
    }
}

/// Uses `access_token` when supplied, otherwise the password grant.
#[derive(Debug)]
pub struct CampbellAuth {
    preissued: StaticKeyAuth,
    exchange: TokenExchangeAuth<CampbellGrant>,
}

impl CampbellAuth {
    /// Creates the strategy with an empty token cache.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            preissued: StaticKeyAuth::new("campbell.access_token"),
            exchange: TokenExchangeAuth::new("campbell.password", CampbellGrant, clock),
        }
    }
}

#[async_trait]
impl AuthStrategy for CampbellAuth {
    fn id(&self) -> &str {
        "campbell"
    }

    fn kind(&self) -> AuthKind {
        AuthKind::TokenExchange
    }

    async fn produce_auth(
        &self,
        request: &CanonicalRequest,
        ctx: &FetchContext,
    ) -> Result<AuthContext, WeatherError> {
        if credentials(request)?.access_token.is_some() {
            self.preissued.produce_auth(request, ctx).await
        } else {
            self.exchange.produce_auth(request, ctx).await
        }
    }

    async fn invalidate(&self, request: &CanonicalRequest) {
        self.exchange.invalidate(request).await;
    }
}
