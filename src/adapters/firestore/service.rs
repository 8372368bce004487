//! Export service trait
//!
//! Abstracts the two Firestore Admin calls the export flow needs so the
//! monitor and coordinator can be driven by test doubles.

use crate::domain::{ExportDestination, Operation, OperationName, Result};
use async_trait::async_trait;

/// Managed export endpoint plus long-running operation lookup
#[async_trait]
pub trait ExportService: Send + Sync {
    /// Starts an export of the database into `destination`
    ///
    /// `collection_ids` limits the export to the named collection groups;
    /// an empty slice exports everything.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::FirestoreError::ExportTriggerFailed`] when the
    /// service rejects the request, carrying the raw error payload.
    async fn start_export(
        &self,
        destination: &ExportDestination,
        collection_ids: &[String],
    ) -> Result<OperationName>;

    /// Fetches the current state of an operation
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::FirestoreError::OperationMonitoringFailed`] on
    /// any non-success response.
    async fn get_operation(&self, name: &OperationName) -> Result<Operation>;
}
