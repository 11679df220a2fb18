//! Static key strategy.

use async_trait::async_trait;
use multiweather_core::{CanonicalRequest, CampbellCredentials, Credentials, WeatherError};
use multiweather_fetch::{AuthContext, AuthKind, AuthStrategy, FetchContext};

/// Returns the stored key or token verbatim.
#[derive(Debug, Clone)]
pub struct StaticKeyAuth {
    id: &'static str,
}

impl StaticKeyAuth {
    /// Creates a strategy with the given id (e.g. `zentra.token`).
    pub fn new(id: &'static str) -> Self {
        Self { id }
    }
}

#[async_trait]
impl AuthStrategy for StaticKeyAuth {
    fn id(&self) -> &str {
        self.id
    }

    fn kind(&self) -> AuthKind {
        AuthKind::StaticKey
    }

    async fn produce_auth(
        &self,
        request: &CanonicalRequest,
        _ctx: &FetchContext,
    ) -> Result<AuthContext, WeatherError> {
        let key = match &request.credentials {
            Credentials::Zentra(c) => c.token.clone(),
            Credentials::Spectrum(c) => c.api_key.clone(),
            Credentials::Campbell(CampbellCredentials {
                access_token: Some(token),
                ..
            }) => token.clone(),
            other => {
                return Err(WeatherError::auth(format!(
                    "{} credentials carry no static key",
                    other.vendor().display_name()
                )));
            }
        };

        if key.expose().trim().is_empty() {
            return Err(WeatherError::auth(format!(
                "{} key is empty",
                request.vendor().display_name()
            )));
        }

        Ok(AuthContext::StaticKey(key))
    }
}
