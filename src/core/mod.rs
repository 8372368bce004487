//! Core business logic for fsexport.
//!
//! # Export Workflow
//!
//! 1. **Trigger**: Ask Firestore to export into `gs://{bucket}/{prefix}`
//! 2. **Monitor**: Poll the returned operation until it is done
//! 3. **Download**: Copy every object under the prefix to the local directory
//! 4. **Report**: Generate export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use fsexport::config::load_config;
//! use fsexport::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("fsexport.toml")?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let coordinator = ExportCoordinator::new(config, shutdown_rx)?;
//!
//! let summary = coordinator.execute_export().await?;
//! println!("Operation: {}", summary.operation_name);
//! println!("Files: {}", summary.files.len());
//! # Ok(())
//! # }
//! ```

pub mod export;
