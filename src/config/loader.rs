//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::FsExportConfig;
use super::secret::secret_string;
use crate::domain::errors::FsExportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Environment variable consulted when `credentials.key_file` is unset
pub const GOOGLE_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`FsExportConfig`]
/// 4. Applies environment variable overrides (`FSEXPORT_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`FsExportError::Configuration`] if the file cannot be read,
/// parsed, substituted or validated.
///
/// # Examples
///
/// ```no_run
/// use fsexport::config::loader::load_config;
///
/// let config = load_config("fsexport.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FsExportConfig> {
    let config = parse_config(path)?;

    config.validate().map_err(|e| {
        FsExportError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Loads configuration without validating it
///
/// Used by commands that apply CLI overrides before validation.
pub fn parse_config(path: impl AsRef<Path>) -> Result<FsExportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FsExportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        FsExportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: FsExportConfig = toml::from_str(&contents)
        .map_err(|e| FsExportError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| FsExportError::Configuration(e.to_string()))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(FsExportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `FSEXPORT_*` prefix
///
/// Variables follow the pattern `FSEXPORT_<SECTION>_<KEY>`, for example
/// `FSEXPORT_STORAGE_BUCKET` or `FSEXPORT_POLLING_INTERVAL_MS`.
fn apply_env_overrides(config: &mut FsExportConfig) {
    if let Ok(val) = std::env::var("FSEXPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Credentials
    if let Ok(val) = std::env::var("FSEXPORT_CREDENTIALS_KEY_FILE") {
        config.credentials.key_file = Some(val);
    }
    if let Ok(val) = std::env::var("FSEXPORT_CREDENTIALS_ACCESS_TOKEN") {
        config.credentials.access_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("FSEXPORT_CREDENTIALS_TOKEN_URI") {
        config.credentials.token_uri = Some(val);
    }
    if config.credentials.key_file.is_none() && config.credentials.access_token.is_none() {
        if let Ok(val) = std::env::var(GOOGLE_APPLICATION_CREDENTIALS) {
            if !val.trim().is_empty() {
                config.credentials.key_file = Some(val);
            }
        }
    }

    // Firestore
    if let Ok(val) = std::env::var("FSEXPORT_FIRESTORE_PROJECT_ID") {
        config.firestore.project_id = Some(val);
    }
    if let Ok(val) = std::env::var("FSEXPORT_FIRESTORE_DATABASE_ID") {
        config.firestore.database_id = val;
    }
    if let Ok(val) = std::env::var("FSEXPORT_FIRESTORE_BASE_URL") {
        config.firestore.base_url = val;
    }

    // Storage
    if let Ok(val) = std::env::var("FSEXPORT_STORAGE_BUCKET") {
        config.storage.bucket = val;
    }
    if let Ok(val) = std::env::var("FSEXPORT_STORAGE_BASE_URL") {
        config.storage.base_url = val;
    }

    // Export
    if let Ok(val) = std::env::var("FSEXPORT_EXPORT_PREFIX") {
        config.export.prefix = val;
    }
    if let Ok(val) = std::env::var("FSEXPORT_EXPORT_DOWNLOAD_DIR") {
        config.export.download_dir = val;
    }

    // Polling
    if let Ok(val) = std::env::var("FSEXPORT_POLLING_INTERVAL_MS") {
        if let Ok(interval) = val.parse() {
            config.polling.interval_ms = interval;
        }
    }
    if let Ok(val) = std::env::var("FSEXPORT_POLLING_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.polling.timeout_seconds = Some(timeout);
        }
    }
    if let Ok(val) = std::env::var("FSEXPORT_POLLING_MAX_ATTEMPTS") {
        if let Ok(attempts) = val.parse() {
            config.polling.max_attempts = Some(attempts);
        }
    }

    // Logging
    if let Ok(val) = std::env::var("FSEXPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("FSEXPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
