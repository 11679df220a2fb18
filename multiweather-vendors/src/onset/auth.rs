//! Onset client-credentials grant.

use multiweather_core::{CanonicalRequest, Credentials, OnsetCredentials, WeatherError};
use multiweather_fetch::HttpRequest;

use crate::auth::TokenGrant;

/// Token endpoint.
pub const TOKEN_URL: &str = "https://webservice.hobolink.com/ws/auth/token";

fn credentials(request: &CanonicalRequest) -> Result<&OnsetCredentials, WeatherError> {
    match &request.credentials {
        Credentials::Onset(creds) => Ok(creds),
        other => Err(WeatherError::auth(format!(
            "{} credentials cannot be exchanged for a HOBOlink token",
            other.vendor().display_name()
        ))),
    }
}

/// `grant_type=client_credentials` form exchange, cached per `client_id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnsetGrant;

impl TokenGrant for OnsetGrant {
    fn cache_key(&self, request: &CanonicalRequest) -> Result<String, WeatherError> {
        Ok(format!("onset:{}", credentials(request)?.client_id))
    }

    fn token_request(&self, request: &CanonicalRequest) -> Result<HttpRequest, WeatherError> {
        let creds = credentials(request)?;
        Ok(HttpRequest::post(HttpRequest::parse_url(TOKEN_URL)?).with_form(vec![
            ("grant_type".to_string(), "client_credentials".to_string()),
            ("client_id".to_string(), creds.client_id.clone()),
            ("client_secret".to_string(), creds.client_secret.expose().to_string()),
        ]))
    }
}
