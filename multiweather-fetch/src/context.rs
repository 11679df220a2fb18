//! Fetch context providing access to the transport and clock.
//!
//! The fetch context is passed to auth strategies and the facade. It bundles
//! the injectable collaborators so tests can substitute a stub transport and
//! a manual clock.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::TransportError;
use crate::host::http::HttpClient;
use crate::transport::Transport;

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for fetch operations.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Timeout for a single HTTP call.
    pub timeout: Duration,
    /// Hosts the default HTTP client may contact. `None` allows any host.
    pub allowed_domains: Option<Vec<String>>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            allowed_domains: None,
        }
    }
}

impl FetchSettings {
    /// Creates settings with custom timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Context provided to auth strategies and the facade.
pub struct FetchContext {
    /// HTTP transport.
    pub transport: Arc<dyn Transport>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
    /// Fetch settings.
    pub settings: FetchSettings,
}

impl FetchContext {
    /// Creates a context with the reqwest transport and the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] if the HTTP client cannot be
    /// created.
    pub fn new() -> Result<Self, TransportError> {
        Self::builder().build()
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }

    /// Returns the effective timeout for HTTP calls.
    pub fn timeout(&self) -> Duration {
        self.settings.timeout
    }
}

impl std::fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchContext")
            .field("clock", &self.clock)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a `FetchContext`.
#[derive(Default)]
pub struct FetchContextBuilder {
    transport: Option<Arc<dyn Transport>>,
    clock: Option<Arc<dyn Clock>>,
    settings: FetchSettings,
}

impl FetchContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the transport.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the clock.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the fetch settings.
    #[must_use]
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Restricts the default HTTP client to the given hosts.
    #[must_use]
    pub fn allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.settings.allowed_domains = Some(domains);
        self
    }

    /// Builds the fetch context.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] if no transport was injected
    /// and the default HTTP client cannot be created.
    pub fn build(self) -> Result<FetchContext, TransportError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let mut client = HttpClient::with_timeout(self.settings.timeout)?;
                if let Some(domains) = &self.settings.allowed_domains {
                    client = client.allowed_domains(domains.clone());
                }
                debug!(timeout = ?self.settings.timeout, "Using default HTTP transport");
                Arc::new(client)
            }
        };

        Ok(FetchContext {
            transport,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            settings: self.settings,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
