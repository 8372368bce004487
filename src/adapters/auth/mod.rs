//! Credential acquisition for the Google APIs
//!
//! - [`TokenProvider`] - trait every credential source implements
//! - [`ServiceAccountTokenProvider`] - JWT bearer flow from a JSON key file
//! - [`StaticTokenProvider`] - pre-issued token
//! - [`CachedTokenProvider`] - expiry-aware cache in front of either
//!
//! [`credentials_from_config`] picks the source from configuration and
//! always wraps it in the cache.

pub mod cache;
pub mod service_account;
pub mod token;

pub use cache::CachedTokenProvider;
pub use service_account::{ServiceAccountKey, ServiceAccountTokenProvider};
pub use token::{AccessToken, StaticTokenProvider, TokenProvider};

use crate::adapters::http::build_http_client;
use crate::config::CredentialsConfig;
use crate::domain::{FsExportError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Token provider plus what the credential source tells us about the project
pub struct Credentials {
    pub provider: Arc<dyn TokenProvider>,

    /// `project_id` from the service account key, if any
    pub project_id: Option<String>,
}

/// Builds the credential source described by `config`
///
/// A key file takes precedence over a static access token.
///
/// # Errors
///
/// Returns [`FsExportError::Authentication`] if the key file cannot be read
/// and [`FsExportError::Configuration`] if no source is configured.
pub fn credentials_from_config(config: &CredentialsConfig, timeout: Duration) -> Result<Credentials> {
    let skew = Duration::from_secs(config.refresh_skew_seconds);

    if let Some(key_file) = &config.key_file {
        let key = ServiceAccountKey::from_file(key_file)?;
        let project_id = key.project_id.clone();
        let provider = ServiceAccountTokenProvider::new(
            build_http_client(timeout)?,
            key,
            config.scopes.clone(),
            config.token_uri.clone(),
        );
        tracing::info!(
            client_email = provider.client_email(),
            "Using service account credentials"
        );
        return Ok(Credentials {
            provider: Arc::new(CachedTokenProvider::new(provider, skew)),
            project_id,
        });
    }

    if let Some(token) = &config.access_token {
        tracing::info!("Using pre-issued access token");
        return Ok(Credentials {
            provider: Arc::new(CachedTokenProvider::new(
                StaticTokenProvider::new(token.clone()),
                skew,
            )),
            project_id: None,
        });
    }

    Err(FsExportError::Configuration(
        "No credential source configured".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[tokio::test]
    async fn test_static_token_from_config() {
        let config = CredentialsConfig {
            access_token: Some(secret_string("ya29.cfg".to_string())),
            ..Default::default()
        };
        let creds = credentials_from_config(&config, Duration::from_secs(5)).unwrap();
        assert!(creds.project_id.is_none());
        assert_eq!(creds.provider.kind(), "static");
        let token = creds.provider.access_token().await.unwrap();
        assert_eq!(token.bearer(), "Bearer ya29.cfg");
    }

    #[test]
    fn test_missing_key_file_is_auth_error() {
        let config = CredentialsConfig {
            key_file: Some("/nonexistent/key.json".to_string()),
            ..Default::default()
        };
        let result = credentials_from_config(&config, Duration::from_secs(5));
        assert!(matches!(result, Err(FsExportError::Authentication(_))));
    }

    #[test]
    fn test_no_source_is_configuration_error() {
        let result = credentials_from_config(&CredentialsConfig::default(), Duration::from_secs(5));
        assert!(matches!(result, Err(FsExportError::Configuration(_))));
    }
}
