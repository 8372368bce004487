//! Domain error types
//!
//! This module defines the error hierarchy for fsexport.
//! All errors are domain-specific and don't expose third-party types.

use std::time::Duration;
use thiserror::Error;

/// Main fsexport error type
///
/// This is the primary error type used throughout the application.
/// It wraps the service-specific error types and carries enough context
/// for the CLI to pick an exit code.
#[derive(Debug, Error)]
pub enum FsExportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Credential acquisition errors
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Firestore Admin API errors
    #[error("Firestore error: {0}")]
    Firestore(#[from] FirestoreError),

    /// Cloud Storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The operation did not complete within the polling limits
    #[error("Operation {operation} still running after {attempts} status checks ({elapsed:?})")]
    PollTimeout {
        operation: String,
        attempts: u32,
        elapsed: Duration,
    },

    /// A shutdown signal arrived while waiting
    #[error("Interrupted while waiting for operation {0}")]
    Interrupted(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl FsExportError {
    /// Process exit code for this error
    ///
    /// `2` configuration, `4` credentials/connection setup, `130` interrupted,
    /// `5` everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            FsExportError::Configuration(_) | FsExportError::Validation(_) => 2,
            FsExportError::Authentication(_) => 4,
            FsExportError::Interrupted(_) => 130,
            _ => 5,
        }
    }
}

/// Firestore Admin API errors
///
/// Errors that occur while starting or monitoring an export operation.
/// `ExportTriggerFailed` and `OperationMonitoringFailed` carry the raw
/// response body for diagnostics.
#[derive(Debug, Error)]
pub enum FirestoreError {
    /// The export request was rejected
    #[error("Export trigger failed with status {status}: {body}")]
    ExportTriggerFailed { status: u16, body: String },

    /// An operation status request was rejected
    #[error("Operation monitoring failed with status {status}: {body}")]
    OperationMonitoringFailed { status: u16, body: String },

    /// The operation completed but reported an error
    #[error("Operation {name} failed (code {code}): {message}")]
    OperationFailed {
        name: String,
        code: i32,
        message: String,
    },

    /// Failed to reach the Firestore endpoint
    #[error("Failed to connect to Firestore: {0}")]
    ConnectionFailed(String),

    /// Response could not be understood
    #[error("Invalid response from Firestore: {0}")]
    InvalidResponse(String),
}

/// Cloud Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Listing objects was rejected
    #[error("Failed to list objects in bucket {bucket} with status {status}: {body}")]
    ListFailed {
        bucket: String,
        status: u16,
        body: String,
    },

    /// Downloading an object was rejected
    #[error("Failed to download {object} with status {status}: {body}")]
    DownloadFailed {
        object: String,
        status: u16,
        body: String,
    },

    /// Failed to reach the storage endpoint
    #[error("Failed to connect to Cloud Storage: {0}")]
    ConnectionFailed(String),

    /// Object name cannot be mapped to a path inside the download directory
    #[error("Object name cannot be written locally: {0}")]
    InvalidObjectName(String),

    /// A `gs://` location could not be parsed
    #[error("Invalid storage URI: {0}")]
    InvalidUri(String),

    /// Response could not be understood
    #[error("Invalid response from Cloud Storage: {0}")]
    InvalidResponse(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for FsExportError {
    fn from(err: std::io::Error) -> Self {
        FsExportError::Io(err.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FsExportError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_trigger_error_surfaces_body() {
        let err: FsExportError = FirestoreError::ExportTriggerFailed {
            status: 403,
            body: r#"{"error":{"status":"PERMISSION_DENIED"}}"#.to_string(),
        }
        .into();
        assert!(matches!(err, FsExportError::Firestore(_)));
        assert!(err.to_string().contains("PERMISSION_DENIED"));
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn test_storage_error_conversion() {
        let err: FsExportError = StorageError::InvalidObjectName("../x".to_string()).into();
        assert!(matches!(err, FsExportError::Storage(_)));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(FsExportError::Configuration("x".into()).exit_code(), 2);
        assert_eq!(FsExportError::Validation("x".into()).exit_code(), 2);
        assert_eq!(FsExportError::Authentication("x".into()).exit_code(), 4);
        assert_eq!(FsExportError::Interrupted("op".into()).exit_code(), 130);
        let timeout = FsExportError::PollTimeout {
            operation: "operations/abc".into(),
            attempts: 3,
            elapsed: Duration::from_secs(30),
        };
        assert_eq!(timeout.exit_code(), 5);
        assert!(timeout.to_string().contains("3 status checks"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: FsExportError = io_err.into();
        assert!(matches!(err, FsExportError::Io(_)));
    }
}
