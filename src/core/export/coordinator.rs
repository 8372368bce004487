//! Export coordinator - main orchestrator for the export process
//!
//! Triggers a managed export, waits for the operation to finish and copies
//! the written files to the local download directory.

use crate::adapters::auth::credentials_from_config;
use crate::adapters::firestore::{ExportService, FirestoreAdminClient};
use crate::adapters::storage::{GcsClient, ObjectStorage};
use crate::config::FsExportConfig;
use crate::core::export::download::ArtifactDownloader;
use crate::core::export::monitor::{OperationMonitor, PollingPolicy};
use crate::core::export::summary::ExportSummary;
use crate::domain::{ExportDestination, FsExportError, Operation, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Export coordinator
pub struct ExportCoordinator {
    config: FsExportConfig,
    export_service: Arc<dyn ExportService>,
    storage: Arc<dyn ObjectStorage>,
    shutdown: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a coordinator talking to the Google APIs
    ///
    /// # Errors
    ///
    /// - [`FsExportError::Authentication`] if the credential source cannot
    ///   be loaded
    /// - [`FsExportError::Configuration`] if no project id is configured and
    ///   the credentials do not name one
    pub fn new(config: FsExportConfig, shutdown: watch::Receiver<bool>) -> Result<Self> {
        let auth_timeout = Duration::from_secs(config.firestore.timeout_seconds);
        let credentials = credentials_from_config(&config.credentials, auth_timeout)?;

        let project_id = config
            .firestore
            .project_id
            .clone()
            .or(credentials.project_id)
            .ok_or_else(|| {
                FsExportError::Configuration(
                    "firestore.project_id is not set and the credentials do not name a project"
                        .to_string(),
                )
            })?;

        let export_service = Arc::new(FirestoreAdminClient::new(
            &config.firestore,
            project_id,
            credentials.provider.clone(),
        )?);
        tracing::debug!(database = %export_service.database_name(), "Firestore client ready");

        let storage = Arc::new(GcsClient::new(&config.storage, credentials.provider)?);

        Ok(Self::with_services(config, export_service, storage, shutdown))
    }

    /// Create a coordinator over explicit service implementations
    pub fn with_services(
        config: FsExportConfig,
        export_service: Arc<dyn ExportService>,
        storage: Arc<dyn ObjectStorage>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            export_service,
            storage,
            shutdown,
        }
    }

    /// Execute the export
    ///
    /// 1. Triggers the export to `gs://{bucket}/{prefix}`
    /// 2. Polls the returned operation until it is done
    /// 3. Downloads every object under the prefix (unless disabled)
    ///
    /// Any failure ends the run; later steps are not attempted.
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let destination = self.resolve_destination()?;

        tracing::info!(
            destination = %destination,
            collections = ?self.config.firestore.collection_ids,
            "Starting export process"
        );

        let operation_name = self
            .export_service
            .start_export(&destination, &self.config.firestore.collection_ids)
            .await?;
        tracing::info!(operation = %operation_name, "Export operation started");

        let mut monitor = OperationMonitor::new(
            self.export_service.as_ref(),
            PollingPolicy::from(&self.config.polling),
            self.shutdown.clone(),
        );
        let outcome = monitor.wait_for_completion(&operation_name).await?;

        let written_to = reported_destination(&outcome.operation, &destination);
        let mut summary = ExportSummary::new(operation_name, written_to);
        summary.poll_attempts = outcome.attempts;

        if !self.config.export.download {
            tracing::info!("Download disabled, leaving export in the bucket");
            let summary = summary.with_duration(start_time.elapsed());
            summary.log_summary();
            return Ok(summary);
        }

        if *self.shutdown.borrow() {
            return Err(FsExportError::Interrupted(summary.operation_name.to_string()));
        }

        let downloader =
            ArtifactDownloader::new(self.storage.as_ref(), &self.config.export.download_dir);
        summary.files = downloader.download_all(&summary.destination).await?;

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Configured destination, with a per-run timestamp directory if enabled
    fn resolve_destination(&self) -> Result<ExportDestination> {
        let destination = self.config.destination()?;
        if !self.config.export.timestamp_subdirectory {
            return Ok(destination);
        }
        let stamp = Utc::now().format("%Y-%m-%dT%H-%M-%SZ").to_string();
        Ok(destination.join(&stamp)?)
    }
}

/// Location the finished operation says it wrote to, falling back to ours
fn reported_destination(operation: &Operation, requested: &ExportDestination) -> ExportDestination {
    let Some(uri) = operation.output_uri_prefix() else {
        return requested.clone();
    };

    match ExportDestination::parse(uri) {
        Ok(reported) if reported == *requested => reported,
        Ok(reported) => {
            tracing::warn!(
                requested = %requested,
                reported = %reported,
                "Operation reports a different output location, downloading from it"
            );
            reported
        }
        Err(e) => {
            tracing::warn!(uri, error = %e, "Ignoring unparseable output location");
            requested.clone()
        }
    }
}
