//! Expiry-aware token cache
//!
//! Wraps any [`TokenProvider`] so a token is fetched once and only renewed
//! when it is about to expire. The cached token is dropped with the cache.

use super::token::{AccessToken, TokenProvider};
use crate::domain::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Caching decorator around a [`TokenProvider`]
pub struct CachedTokenProvider<P> {
    inner: P,
    refresh_skew: Duration,
    cached: Mutex<Option<AccessToken>>,
}

impl<P: TokenProvider> CachedTokenProvider<P> {
    /// Creates a cache that renews tokens `refresh_skew` before they expire
    pub fn new(inner: P, refresh_skew: Duration) -> Self {
        Self {
            inner,
            refresh_skew,
            cached: Mutex::new(None),
        }
    }
}

#[async_trait]
impl<P: TokenProvider> TokenProvider for CachedTokenProvider<P> {
    async fn access_token(&self) -> Result<AccessToken> {
        // Held across the fetch so concurrent callers share one renewal.
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now(), self.refresh_skew) {
                return Ok(token.clone());
            }
            tracing::debug!(provider = self.inner.kind(), "Access token expiring, renewing");
        }

        let token = self.inner.access_token().await?;
        tracing::debug!(
            provider = self.inner.kind(),
            expires_at = ?token.expires_at(),
            "Acquired access token"
        );
        *cached = Some(token.clone());
        Ok(token)
    }

    fn kind(&self) -> &'static str {
        self.inner.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingProvider {
        calls: Arc<AtomicUsize>,
        lifetime: chrono::Duration,
    }

    #[async_trait]
    impl TokenProvider for CountingProvider {
        async fn access_token(&self) -> Result<AccessToken> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AccessToken::new(format!("token-{n}"), Utc::now() + self.lifetime))
        }

        fn kind(&self) -> &'static str {
            "counting"
        }
    }

    #[tokio::test]
    async fn test_reuses_fresh_token() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = CachedTokenProvider::new(
            CountingProvider {
                calls: calls.clone(),
                lifetime: chrono::Duration::hours(1),
            },
            Duration::from_secs(60),
        );

        let first = cache.access_token().await.unwrap();
        let second = cache.access_token().await.unwrap();
        let third = cache.access_token().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.bearer(), "Bearer token-0");
        assert_eq!(second.bearer(), first.bearer());
        assert_eq!(third.bearer(), first.bearer());
    }

    #[tokio::test]
    async fn test_renews_token_inside_skew_window() {
        let calls = Arc::new(AtomicUsize::new(0));
        // Every token expires within the skew window, so each call renews.
        let cache = CachedTokenProvider::new(
            CountingProvider {
                calls: calls.clone(),
                lifetime: chrono::Duration::seconds(30),
            },
            Duration::from_secs(60),
        );

        let first = cache.access_token().await.unwrap();
        let second = cache.access_token().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_ne!(first.bearer(), second.bearer());
        assert_eq!(cache.kind(), "counting");
    }
}
