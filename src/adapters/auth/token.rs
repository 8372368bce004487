//! Access tokens and the provider trait

use crate::config::{secret_string, SecretString};
use crate::domain::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Short-lived OAuth bearer token
#[derive(Debug, Clone)]
pub struct AccessToken {
    secret: SecretString,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Token with a known expiry
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            secret: secret_string(token.into()),
            expires_at: Some(expires_at),
        }
    }

    /// Token without a known expiry
    pub fn non_expiring(token: impl Into<String>) -> Self {
        Self {
            secret: secret_string(token.into()),
            expires_at: None,
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// `Authorization` header value
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.secret.expose_secret().as_str())
    }

    /// True while the token stays valid for at least `skew` after `now`
    pub fn is_fresh(&self, now: DateTime<Utc>, skew: Duration) -> bool {
        match self.expires_at {
            None => true,
            Some(expires_at) => {
                let skew = chrono::Duration::from_std(skew).unwrap_or(chrono::Duration::zero());
                now + skew < expires_at
            }
        }
    }
}

/// Source of bearer credentials for the Google APIs
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns a token valid for the configured scopes
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::FsExportError::Authentication`] if no token
    /// can be obtained.
    async fn access_token(&self) -> Result<AccessToken>;

    /// Short description for logs
    fn kind(&self) -> &'static str;
}

/// Provider that hands out a pre-issued token
///
/// Useful with `gcloud auth print-access-token` and in tests.
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    pub fn new(token: SecretString) -> Self {
        Self {
            token: AccessToken {
                secret: token,
                expires_at: None,
            },
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<AccessToken> {
        Ok(self.token.clone())
    }

    fn kind(&self) -> &'static str {
        "static"
    }
}
