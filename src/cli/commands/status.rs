//! Status command implementation
//!
//! This module implements the `status` command: a single lookup of an
//! export operation.

use crate::adapters::auth::credentials_from_config;
use crate::adapters::firestore::{ExportService, FirestoreAdminClient};
use crate::config::load_config;
use crate::domain::{FsExportError, Operation, OperationName, OperationState};
use clap::Args;
use std::time::Duration;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Operation name, e.g. `projects/p/databases/(default)/operations/abc`
    pub operation: String,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(operation = %self.operation, "Checking operation status");

        let name = match OperationName::new(self.operation.clone()) {
            Ok(n) => n,
            Err(e) => {
                let err = FsExportError::Validation(format!("invalid operation name: {e}"));
                println!("❌ {err}");
                return Ok(err.exit_code());
            }
        };

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(2);
            }
        };

        let timeout = Duration::from_secs(config.firestore.timeout_seconds);
        let credentials = match credentials_from_config(&config.credentials, timeout) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load credentials");
                println!("   Error: {}", e);
                return Ok(e.exit_code());
            }
        };

        // Operation names are absolute, the project only shapes the client
        let project_id = config
            .firestore
            .project_id
            .clone()
            .or(credentials.project_id)
            .unwrap_or_default();
        let client = FirestoreAdminClient::new(&config.firestore, project_id, credentials.provider)?;

        let operation = match client.get_operation(&name).await {
            Ok(op) => op,
            Err(e) => {
                println!("❌ Failed to fetch operation");
                println!("   Error: {}", e);
                return Ok(e.exit_code());
            }
        };

        print_operation(&operation);
        Ok(0)
    }
}

fn print_operation(operation: &Operation) {
    println!("📊 Operation Status");
    println!();
    println!("  Name: {}", operation.name);
    println!(
        "  Done: {}",
        matches!(operation.state(), OperationState::Done)
    );
    if let Some(state) = operation.reported_state() {
        println!("  State: {state}");
    }
    if let Some(docs) = operation.document_progress() {
        match docs.percent() {
            Some(pct) => println!(
                "  Documents: {} / {} ({pct:.1}%)",
                docs.completed, docs.estimated
            ),
            None => println!("  Documents: {}", docs.completed),
        }
    }
    if let Some(bytes) = operation.byte_progress() {
        println!("  Bytes: {} / {}", bytes.completed, bytes.estimated);
    }
    if let Some(uri) = operation.output_uri_prefix() {
        println!("  Output: {uri}");
    }
    if let Some(error) = &operation.error {
        println!("  Error: {} (code {})", error.message, error.code);
    }
    println!();
}
