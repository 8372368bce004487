//! Export orchestration
//!
//! This module provides the core export logic for fsexport:
//! - Operation polling with interval, timeout and attempt limits
//! - Artifact download from the export prefix
//! - Export coordination and summary reporting

pub mod coordinator;
pub mod download;
pub mod monitor;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use download::ArtifactDownloader;
pub use monitor::{MonitorOutcome, OperationMonitor, PollingPolicy};
pub use summary::ExportSummary;
