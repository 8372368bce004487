// fsexport - Firestore managed export and download tool
// Copyright (c) 2025 fsexport Contributors
// Licensed under the MIT License

//! # fsexport - Firestore export orchestration
//!
//! fsexport triggers a managed export of a Firestore database into a Cloud
//! Storage bucket, waits for the long-running operation to finish and copies
//! the written files to a local directory.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Authenticating** with a service account key (JWT bearer flow) or a
//!   pre-issued access token
//! - **Triggering** `exportDocuments` on the Firestore Admin API
//! - **Monitoring** the returned operation until it is done
//! - **Downloading** every object under the export prefix
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export orchestration (monitor, download, coordinator)
//! - [`adapters`] - External integrations (OAuth, Firestore, Cloud Storage)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fsexport::config::load_config;
//! use fsexport::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("fsexport.toml")?;
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let coordinator = ExportCoordinator::new(config, shutdown_rx)?;
//!
//!     let summary = coordinator.execute_export().await?;
//!     println!(
//!         "{} finished, {} files downloaded",
//!         summary.operation_name,
//!         summary.files.len()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible call returns [`domain::Result`], whose error type
//! [`domain::FsExportError`] maps to a process exit code:
//!
//! ```rust,no_run
//! use fsexport::domain::FsExportError;
//!
//! fn example() -> Result<(), FsExportError> {
//!     let config = fsexport::config::load_config("fsexport.toml")?;
//!     println!("exporting to {}", config.destination()?);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
