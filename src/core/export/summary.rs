//! Export summary and reporting
//!
//! This module defines the result of one export run.

use crate::domain::{DownloadedFile, ExportDestination, OperationName};
use std::time::Duration;

/// Summary of an export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Name of the long-running export operation
    pub operation_name: OperationName,

    /// Number of status checks until the operation finished
    pub poll_attempts: u32,

    /// Where the export was written
    pub destination: ExportDestination,

    /// Files copied locally (empty when downloads are disabled)
    pub files: Vec<DownloadedFile>,

    /// Duration of the whole run
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a summary with no downloaded files
    pub fn new(operation_name: OperationName, destination: ExportDestination) -> Self {
        Self {
            operation_name,
            poll_attempts: 0,
            destination,
            files: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Total bytes written to disk
    pub fn bytes_downloaded(&self) -> u64 {
        self.files.iter().map(|f| f.bytes).sum()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            operation = %self.operation_name,
            poll_attempts = self.poll_attempts,
            destination = %self.destination,
            files = self.files.len(),
            bytes = self.bytes_downloaded(),
            duration_secs = self.duration.as_secs(),
            "Export completed"
        );
    }
}
