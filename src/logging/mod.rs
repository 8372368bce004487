//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels (`RUST_LOG` overrides)
//! - Console output on stderr
//! - JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use fsexport::logging::init_logging;
//! use fsexport::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a downloaded object
///
/// # Example
///
/// ```no_run
/// use fsexport::log_download;
///
/// log_download!("backups/output-0", "downloads/backups/output-0", 1024u64);
/// ```
#[macro_export]
macro_rules! log_download {
    ($object:expr, $path:expr, $bytes:expr) => {
        tracing::info!(
            object = %$object,
            path = %$path,
            bytes = $bytes,
            "Downloaded object"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use fsexport::log_error_with_context;
/// use fsexport::domain::FsExportError;
///
/// let error = FsExportError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
