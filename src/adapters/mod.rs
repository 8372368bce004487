//! External system integrations for fsexport.
//!
//! - [`auth`] - OAuth credentials for the Google APIs
//! - [`firestore`] - Firestore Admin API (export trigger, operation lookup)
//! - [`storage`] - Cloud Storage (object listing and download)
//!
//! # Design Pattern
//!
//! Each remote service sits behind a trait ([`auth::TokenProvider`],
//! [`firestore::ExportService`], [`storage::ObjectStorage`]) so the export
//! flow can run against test doubles.
//!
//! ```rust,no_run
//! use fsexport::adapters::auth::credentials_from_config;
//! use fsexport::adapters::firestore::{ExportService, FirestoreAdminClient};
//! use fsexport::config::load_config;
//! use fsexport::domain::OperationName;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("fsexport.toml")?;
//! let creds = credentials_from_config(&config.credentials, Duration::from_secs(30))?;
//! let client = FirestoreAdminClient::new(&config.firestore, "my-project", creds.provider)?;
//! let op = client.get_operation(&OperationName::new("operations/abc")?).await?;
//! println!("done: {}", op.done);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod firestore;
pub mod http;
pub mod storage;
