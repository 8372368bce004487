//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the fsexport configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as well
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Credentials: {}",
            match (&config.credentials.key_file, &config.credentials.access_token) {
                (Some(path), _) => format!("service account key {path}"),
                (None, Some(_)) => "access token".to_string(),
                (None, None) => "none".to_string(),
            }
        );
        println!(
            "  Project: {}",
            config.firestore.project_id.as_deref().unwrap_or("(from credentials)")
        );
        println!("  Database: {}", config.firestore.database_id);
        if !config.firestore.collection_ids.is_empty() {
            println!("  Collections: {:?}", config.firestore.collection_ids);
        }
        match config.destination() {
            Ok(dest) => println!("  Destination: {dest}"),
            Err(e) => println!("  Destination: invalid ({e})"),
        }
        println!("  Download: {}", config.export.download);
        println!("  Download Dir: {}", config.export.download_dir);
        println!("  Poll Interval: {}ms", config.polling.interval_ms);
        println!();
        Ok(0)
    }
}
