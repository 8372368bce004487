//! Configuration schema types
//!
//! This module defines the configuration structure that maps to `fsexport.toml`.

use crate::config::SecretString;
use crate::domain::ExportDestination;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OAuth scopes requested for the service account token
pub const DEFAULT_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/datastore",
    "https://www.googleapis.com/auth/cloud-platform",
];

/// Main fsexport configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsExportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Credential source
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Firestore Admin API settings
    pub firestore: FirestoreConfig,

    /// Cloud Storage settings
    pub storage: StorageConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Operation polling settings
    #[serde(default)]
    pub polling: PollingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FsExportConfig {
    /// Checks that every request the export needs can be built
    ///
    /// # Errors
    ///
    /// Returns an error describing the first missing or malformed value
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.credentials.validate()?;
        self.firestore.validate()?;
        self.storage.validate()?;
        self.polling.validate()?;
        self.logging.validate()?;
        self.destination().map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Export destination built from `storage.bucket` and `export.prefix`
    pub fn destination(&self) -> crate::domain::Result<ExportDestination> {
        Ok(ExportDestination::new(
            self.storage.bucket.clone(),
            &self.export.prefix,
        )?)
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Credential source configuration
///
/// Either a service account key file or a pre-issued access token must be
/// present. When both are set the key file wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Path to a service account JSON key file
    ///
    /// Falls back to `GOOGLE_APPLICATION_CREDENTIALS` when unset.
    #[serde(default)]
    pub key_file: Option<String>,

    /// Pre-issued OAuth access token, e.g. from `gcloud auth print-access-token`
    #[serde(default)]
    pub access_token: Option<SecretString>,

    /// OAuth scopes requested with the service account assertion
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,

    /// Token endpoint override (defaults to the key file's `token_uri`)
    #[serde(default)]
    pub token_uri: Option<String>,

    /// Seconds before expiry at which a cached token is renewed
    #[serde(default = "default_refresh_skew_seconds")]
    pub refresh_skew_seconds: u64,
}

impl CredentialsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.key_file.is_none() && self.access_token.is_none() {
            return Err(
                "credentials.key_file or credentials.access_token must be set \
                 (or GOOGLE_APPLICATION_CREDENTIALS exported)"
                    .to_string(),
            );
        }
        if self.key_file.is_some() && self.scopes.is_empty() {
            return Err("credentials.scopes cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            key_file: None,
            access_token: None,
            scopes: default_scopes(),
            token_uri: None,
            refresh_skew_seconds: default_refresh_skew_seconds(),
        }
    }
}

/// Firestore Admin API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreConfig {
    /// Google Cloud project ID (defaults to the key file's `project_id`)
    #[serde(default)]
    pub project_id: Option<String>,

    /// Database ID
    #[serde(default = "default_database_id")]
    pub database_id: String,

    /// API base URL
    #[serde(default = "default_firestore_base_url")]
    pub base_url: String,

    /// Collection IDs to export; empty exports every collection
    #[serde(default)]
    pub collection_ids: Vec<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl FirestoreConfig {
    fn validate(&self) -> Result<(), String> {
        validate_base_url("firestore.base_url", &self.base_url)?;
        if self.database_id.trim().is_empty() {
            return Err("firestore.database_id cannot be empty".to_string());
        }
        if let Some(project_id) = &self.project_id {
            if project_id.trim().is_empty() {
                return Err("firestore.project_id cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            database_id: default_database_id(),
            base_url: default_firestore_base_url(),
            collection_ids: Vec::new(),
            timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

/// Cloud Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket the export is written to
    pub bucket: String,

    /// JSON API base URL
    #[serde(default = "default_storage_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (covers a whole object download)
    #[serde(default = "default_download_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        validate_base_url("storage.base_url", &self.base_url)?;
        if self.bucket.trim().is_empty() {
            return Err("storage.bucket cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Object prefix inside the bucket the export is written under
    #[serde(default)]
    pub prefix: String,

    /// Local directory the exported files are copied to
    #[serde(default = "default_download_dir")]
    pub download_dir: String,

    /// Append a UTC timestamp directory to the prefix for every run
    #[serde(default)]
    pub timestamp_subdirectory: bool,

    /// Download the files after the export completes
    #[serde(default = "default_true")]
    pub download: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            download_dir: default_download_dir(),
            timestamp_subdirectory: false,
            download: true,
        }
    }
}

/// Operation polling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay between status checks in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub interval_ms: u64,

    /// Give up after this many seconds (unset = wait indefinitely)
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Give up after this many status checks (unset = unlimited)
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

impl PollingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.interval_ms == 0 {
            return Err("polling.interval_ms must be > 0".to_string());
        }
        if self.max_attempts == Some(0) {
            return Err("polling.max_attempts must be > 0 when set".to_string());
        }
        Ok(())
    }

    /// Delay between status checks
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Overall wait limit
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval_ms(),
            timeout_seconds: None,
            max_attempts: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn validate_base_url(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(format!("{field} must start with http:// or https://"));
    }
    Ok(())
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_scopes() -> Vec<String> {
    DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect()
}

fn default_refresh_skew_seconds() -> u64 {
    60
}

fn default_database_id() -> String {
    "(default)".to_string()
}

fn default_firestore_base_url() -> String {
    "https://firestore.googleapis.com".to_string()
}

fn default_storage_base_url() -> String {
    "https://storage.googleapis.com".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    60
}

fn default_download_timeout_seconds() -> u64 {
    300
}

fn default_download_dir() -> String {
    "./downloads".to_string()
}

fn default_poll_interval_ms() -> u64 {
    10_000
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
