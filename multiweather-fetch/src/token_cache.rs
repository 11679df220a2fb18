//! Bearer token cache.
//!
//! Tokens obtained by an exchange (Onset client credentials, Campbell
//! password grant) are cached per credential key until they expire. The
//! read-check-refresh sequence holds a per-key lock, so concurrent callers
//! sharing one cache trigger a single exchange and never observe a token
//! mid-refresh. Different keys refresh independently.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use multiweather_core::{Secret, WeatherError};
use tokio::sync::Mutex;
use tracing::debug;

use crate::clock::Clock;

/// Tokens are treated as expired this long before their declared expiry.
const DEFAULT_SKEW_SECS: i64 = 30;

// ============================================================================
// Token Types
// ============================================================================

/// A freshly issued token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The bearer token.
    pub access_token: Secret,
    /// Declared validity.
    pub expires_in: Duration,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: Secret,
    expires_at: DateTime<Utc>,
}

type Slot = Arc<Mutex<Option<CachedToken>>>;

// ============================================================================
// Token Cache
// ============================================================================

/// Per-key bearer token cache with an injectable clock.
#[derive(Debug)]
pub struct TokenCache {
    clock: Arc<dyn Clock>,
    skew: Duration,
    slots: Mutex<HashMap<String, Slot>>,
}

impl TokenCache {
    /// Creates an empty cache.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            skew: Duration::seconds(DEFAULT_SKEW_SECS),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Sets the expiry skew.
    #[must_use]
    pub fn with_skew(mut self, skew: Duration) -> Self {
        self.skew = skew;
        self
    }

    async fn slot(&self, key: &str) -> Slot {
        let mut slots = self.slots.lock().await;
        Arc::clone(slots.entry(key.to_string()).or_default())
    }

    /// Returns the slot for `key` without creating one.
    async fn existing_slot(&self, key: &str) -> Option<Slot> {
        self.slots.lock().await.get(key).map(Arc::clone)
    }

    /// Returns the cached token for `key`, running `refresh` when there is
    /// none or it has expired.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `refresh`; the slot stays empty.
    pub async fn get_or_refresh<F, Fut>(&self, key: &str, refresh: F) -> Result<Secret, WeatherError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<IssuedToken, WeatherError>> + Send,
    {
        let slot = self.slot(key).await;
        let mut cached = slot.lock().await;

        let now = self.clock.now();
        if let Some(token) = cached.as_ref() {
            if now < token.expires_at {
                debug!(key = %key, "Token cache hit");
                return Ok(token.token.clone());
            }
            debug!(key = %key, "Cached token expired");
        }

        let issued = refresh().await?;
        let lifetime = if issued.expires_in > self.skew {
            issued.expires_in - self.skew
        } else {
            issued.expires_in
        };
        let token = issued.access_token;
        *cached = Some(CachedToken {
            token: token.clone(),
            expires_at: now + lifetime,
        });
        debug!(key = %key, lifetime_secs = lifetime.num_seconds(), "Token cached");
        Ok(token)
    }

    /// Drops the cached token for `key`.
    pub async fn invalidate(&self, key: &str) {
        let Some(slot) = self.existing_slot(key).await else {
            return;
        };
        if slot.lock().await.take().is_some() {
            debug!(key = %key, "Token invalidated");
        }
    }

    /// Returns true if a token is cached for `key` and still valid.
    pub async fn is_cached(&self, key: &str) -> bool {
        let Some(slot) = self.existing_slot(key).await else {
            return false;
        };
        let now = self.clock.now();
        slot.lock().await.as_ref().is_some_and(|t| now < t.expires_at)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn setup() -> (Arc<ManualClock>, TokenCache) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2022, 2, 16, 12, 0, 0).unwrap(),
        ));
        let cache = TokenCache::new(clock.clone());
        (clock, cache)
    }

    fn issue(counter: &AtomicUsize) -> Result<IssuedToken, WeatherError> {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        Ok(IssuedToken {
            access_token: Secret::new(format!("token-{n}")),
            expires_in: Duration::seconds(600),
        })
    }

    #[tokio::test]
    async fn test_hit_within_validity() {
        let (clock, cache) = setup();
        let calls = AtomicUsize::new(0);

        let a = cache.get_or_refresh("client", || async { issue(&calls) }).await.unwrap();
        clock.advance(Duration::seconds(300));
        let b = cache.get_or_refresh("client", || async { issue(&calls) }).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_refresh_after_expiry() {
        let (clock, cache) = setup();
        let calls = AtomicUsize::new(0);

        cache.get_or_refresh("client", || async { issue(&calls) }).await.unwrap();
        // 600s lifetime minus 30s skew.
        clock.advance(Duration::seconds(571));
        let token = cache.get_or_refresh("client", || async { issue(&calls) }).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(token.expose(), "token-1");
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let (_clock, cache) = setup();
        let calls = AtomicUsize::new(0);

        cache.get_or_refresh("a", || async { issue(&calls) }).await.unwrap();
        cache.get_or_refresh("b", || async { issue(&calls) }).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_exchange() {
        let (_clock, cache) = setup();
        let calls = AtomicUsize::new(0);

        cache.get_or_refresh("client", || async { issue(&calls) }).await.unwrap();
        assert!(cache.is_cached("client").await);
        cache.invalidate("client").await;
        assert!(!cache.is_cached("client").await);
        cache.get_or_refresh("client", || async { issue(&calls) }).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_lookups_do_not_create_slots() {
        let (_clock, cache) = setup();

        assert!(!cache.is_cached("never-seen").await);
        cache.invalidate("never-seen").await;
        assert!(cache.slots.lock().await.is_empty());

        let calls = AtomicUsize::new(0);
        cache.get_or_refresh("client", || async { issue(&calls) }).await.unwrap();
        assert_eq!(cache.slots.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_is_not_cached() {
        let (_clock, cache) = setup();
        let result = cache
            .get_or_refresh("client", || async { Err(WeatherError::auth("401")) })
            .await;
        assert!(matches!(result, Err(WeatherError::Auth(_))));
        assert!(!cache.is_cached("client").await);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_exchange() {
        let (_clock, cache) = setup();
        let cache = Arc::new(cache);
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_refresh("client", || async move {
                        tokio::task::yield_now().await;
                        issue(&calls)
                    })
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
