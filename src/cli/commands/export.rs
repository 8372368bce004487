//! Export command implementation
//!
//! This module implements the `export` command: trigger a managed export,
//! wait for it and download the written files.

use crate::config::{parse_config, FsExportConfig};
use crate::core::export::{ExportCoordinator, ExportSummary};
use crate::log_error_with_context;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Override the object prefix inside the bucket
    #[arg(long)]
    pub prefix: Option<String>,

    /// Override the local download directory
    #[arg(long)]
    pub download_dir: Option<String>,

    /// Leave the export in the bucket and skip the download
    #[arg(long)]
    pub no_download: bool,

    /// Export only these collection ids (repeatable)
    #[arg(long)]
    pub collection: Vec<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match parse_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(e.exit_code());
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        println!("Export Configuration:");
        println!(
            "  Project: {}",
            config.firestore.project_id.as_deref().unwrap_or("(from credentials)")
        );
        println!("  Database: {}", config.firestore.database_id);
        match describe_destination(&config) {
            Ok(line) => println!("  Destination: {line}"),
            Err(e) => {
                tracing::error!(error = %e, "Invalid export destination");
                eprintln!("Invalid export destination: {e}");
                return Ok(e.exit_code());
            }
        }
        if config.export.download {
            println!("  Download to: {}", config.export.download_dir);
        }
        println!();

        let coordinator = match ExportCoordinator::new(config, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(e.exit_code());
            }
        };

        println!("Starting export...");
        let summary = match coordinator.execute_export().await {
            Ok(s) => s,
            Err(e) => {
                log_error_with_context!(&e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(e.exit_code());
            }
        };

        print_summary(&summary);
        Ok(0)
    }

    fn apply_overrides(&self, config: &mut FsExportConfig) {
        if let Some(prefix) = &self.prefix {
            tracing::info!(prefix = %prefix, "Overriding export prefix from CLI");
            config.export.prefix = prefix.clone();
        }

        if let Some(dir) = &self.download_dir {
            tracing::info!(download_dir = %dir, "Overriding download directory from CLI");
            config.export.download_dir = dir.clone();
        }

        if self.no_download {
            config.export.download = false;
        }

        if !self.collection.is_empty() {
            tracing::info!(collections = ?self.collection, "Overriding collection ids from CLI");
            config.firestore.collection_ids = self.collection.clone();
        }
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("Export Summary:");
    println!("  Operation: {}", summary.operation_name);
    println!("  Status checks: {}", summary.poll_attempts);
    println!("  Location: {}", summary.destination);
    println!("  Files downloaded: {}", summary.files.len());
    println!("  Bytes downloaded: {}", summary.bytes_downloaded());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();
    println!("Export completed successfully!");
}

/// Destination as the coordinator will resolve it
fn describe_destination(config: &FsExportConfig) -> crate::domain::Result<String> {
    let destination = config.destination()?;
    if config.export.timestamp_subdirectory {
        Ok(format!("{destination}<UTC timestamp>/ (new directory per run)"))
    } else {
        Ok(destination.to_string())
    }
}
