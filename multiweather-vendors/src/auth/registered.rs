//! Rainwise registered-mode strategy.

use async_trait::async_trait;
use multiweather_core::{CanonicalRequest, Credentials, WeatherError};
use multiweather_fetch::{AuthContext, AuthKind, AuthStrategy, FetchContext};

/// Passes the registered site and password ids through as query values.
#[derive(Debug, Clone, Default)]
pub struct RegisteredAuth;

impl RegisteredAuth {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuthStrategy for RegisteredAuth {
    fn id(&self) -> &str {
        "rainwise.registered"
    }

    fn kind(&self) -> AuthKind {
        AuthKind::Registered
    }

    async fn produce_auth(
        &self,
        request: &CanonicalRequest,
        _ctx: &FetchContext,
    ) -> Result<AuthContext, WeatherError> {
        let Credentials::Rainwise(creds) = &request.credentials else {
            return Err(WeatherError::auth(format!(
                "{} credentials cannot be used in registered mode",
                request.vendor().display_name()
            )));
        };

        Ok(AuthContext::Registered {
            sid: creds.sid.clone(),
            pid: creds.pid.clone(),
        })
    }
}
