//! Configuration management for fsexport.
//!
//! fsexport reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `FSEXPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//!
//! # Example Configuration
//!
//! ```toml
//! [credentials]
//! key_file = "service-account.json"
//!
//! [firestore]
//! project_id = "my-project"
//!
//! [storage]
//! bucket = "my-bucket"
//!
//! [export]
//! prefix = "backups/firestore"
//! download_dir = "./downloads"
//!
//! [polling]
//! interval_ms = 10000
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fsexport::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("fsexport.toml")?;
//! println!("Exporting to {}", config.destination()?);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, CredentialsConfig, ExportConfig, FirestoreConfig, FsExportConfig,
    LoggingConfig, PollingConfig, StorageConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
