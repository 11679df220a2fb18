//! Vendor capability traits.
//!
//! Each vendor is served by one set of capabilities:
//! - an [`AuthStrategy`] that produces per-call credentials
//! - an optional [`RequestPreparer`] for lookups the call depends on
//! - a [`RequestBuilder`] that turns a request plus credentials into an
//!   [`HttpRequest`]
//! - a [`ResponseNormalizer`] that maps the vendor payload to canonical
//!   readings
//!
//! The facade picks the set by [`Vendor`] tag; nothing inspects request
//! attributes at runtime to choose a vendor.

use std::fmt;

use async_trait::async_trait;
use multiweather_core::{CanonicalRequest, Secret, Vendor, WeatherError};
use serde::{Deserialize, Serialize};

use crate::context::FetchContext;
use crate::transport::HttpRequest;

pub use multiweather_core::ResponseNormalizer;

// ============================================================================
// Auth Kind
// ============================================================================

/// The kind of authentication a vendor uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthKind {
    /// Stored key or token sent verbatim.
    StaticKey,
    /// Credentials exchanged for a cached bearer token.
    TokenExchange,
    /// Per-request HMAC signature.
    HmacSigned,
    /// Registered identifiers passed as query values.
    Registered,
}

impl AuthKind {
    /// Returns the display name for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::StaticKey => "Static Key",
            Self::TokenExchange => "Token Exchange",
            Self::HmacSigned => "HMAC Signed",
            Self::Registered => "Registered",
        }
    }
}

impl fmt::Display for AuthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Auth Context
// ============================================================================

/// Credentials ready to be placed on one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// A static key or token.
    StaticKey(Secret),
    /// A bearer token obtained by exchange.
    Bearer(Secret),
    /// A request signature and the timestamp it embeds.
    Signed {
        /// Public API key.
        api_key: String,
        /// Unix timestamp (`t`) covered by the signature.
        timestamp: i64,
        /// Lower-case hex HMAC-SHA-256 digest.
        signature: String,
    },
    /// Registered site and password identifiers.
    Registered {
        /// Site id.
        sid: Secret,
        /// Password id.
        pid: Secret,
    },
}

impl AuthContext {
    /// Returns the variant name, for logging.
    pub fn kind(&self) -> AuthKind {
        match self {
            Self::StaticKey(_) => AuthKind::StaticKey,
            Self::Bearer(_) => AuthKind::TokenExchange,
            Self::Signed { .. } => AuthKind::HmacSigned,
            Self::Registered { .. } => AuthKind::Registered,
        }
    }

    /// Returns a mismatch error for builders that received the wrong variant.
    pub fn mismatch(&self, vendor: Vendor) -> WeatherError {
        WeatherError::auth(format!(
            "{} cannot use {} credentials",
            vendor.display_name(),
            self.kind().display_name()
        ))
    }
}

// ============================================================================
// Auth Strategy Trait
// ============================================================================

/// Produces the credentials for one call.
///
/// ```ignore
/// struct ZentraAuth;
///
/// #[async_trait]
/// impl AuthStrategy for ZentraAuth {
///     fn id(&self) -> &str {
///         "zentra.static"
///     }
///
///     fn kind(&self) -> AuthKind {
///         AuthKind::StaticKey
///     }
///
///     async fn produce_auth(
///         &self,
///         request: &CanonicalRequest,
///         _ctx: &FetchContext,
///     ) -> Result<AuthContext, WeatherError> {
///         // Pull the token out of request.credentials
///     }
/// }
/// ```
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// Unique identifier (e.g. `onset.token`).
    fn id(&self) -> &str;

    /// The kind of auth this strategy produces.
    fn kind(&self) -> AuthKind;

    /// Computes the credentials for `request`.
    ///
    /// May perform a network exchange through `ctx.transport`.
    async fn produce_auth(
        &self,
        request: &CanonicalRequest,
        ctx: &FetchContext,
    ) -> Result<AuthContext, WeatherError>;

    /// Forgets any cached state for the request's credentials.
    ///
    /// Called after the data endpoint rejects the credentials.
    async fn invalidate(&self, _request: &CanonicalRequest) {}
}

// ============================================================================
// Request Preparer Trait
// ============================================================================

/// Resolves request details that need a network lookup before the data call.
///
/// Runs after [`AuthStrategy::produce_auth`] and before
/// [`RequestBuilder::build`]. Returning `Ok(None)` leaves the request as is.
#[async_trait]
pub trait RequestPreparer: Send + Sync {
    /// Unique identifier (e.g. `campbell.discovery`).
    fn id(&self) -> &str;

    /// Returns a completed copy of `request`, or `None` if nothing changes.
    ///
    /// # Errors
    ///
    /// [`WeatherError::Auth`] when the lookup rejects the credentials;
    /// recorded errors ([`WeatherError::VendorApi`], [`WeatherError::Transport`])
    /// for lookup failures.
    async fn prepare(
        &self,
        request: &CanonicalRequest,
        auth: &AuthContext,
        ctx: &FetchContext,
    ) -> Result<Option<CanonicalRequest>, WeatherError>;
}

// ============================================================================
// Request Builder Trait
// ============================================================================

/// Builds the vendor HTTP call for a request.
pub trait RequestBuilder: Send + Sync {
    /// Vendor this builder serves.
    fn vendor(&self) -> Vendor;

    /// Checks vendor-specific limits before any network call.
    fn validate(&self, _request: &CanonicalRequest) -> Result<(), WeatherError> {
        Ok(())
    }

    /// Builds the call. Pure: no I/O.
    fn build(
        &self,
        request: &CanonicalRequest,
        auth: &AuthContext,
    ) -> Result<HttpRequest, WeatherError>;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_kind_display() {
        assert_eq!(AuthKind::TokenExchange.display_name(), "Token Exchange");
        assert_eq!(AuthKind::HmacSigned.to_string(), "HMAC Signed");
    }

    #[test]
    fn test_auth_context_kind() {
        assert_eq!(AuthContext::Bearer("x".into()).kind(), AuthKind::TokenExchange);
        let signed = AuthContext::Signed {
            api_key: "k".into(),
            timestamp: 1,
            signature: "s".into(),
        };
        assert_eq!(signed.kind(), AuthKind::HmacSigned);
    }

    #[test]
    fn test_mismatch_is_auth_error() {
        let err = AuthContext::StaticKey("x".into()).mismatch(Vendor::Davis);
        assert!(matches!(err, WeatherError::Auth(_)));
    }
}
