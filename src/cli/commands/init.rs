//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "fsexport.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing fsexport configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your project and bucket", self.output);
                println!("  2. Point credentials.key_file at a service account key");
                println!("     (or export GOOGLE_APPLICATION_CREDENTIALS)");
                println!("  3. Validate configuration: fsexport validate-config");
                println!("  4. Run export: fsexport export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# fsexport configuration

[credentials]
key_file = "service-account.json"

[firestore]
project_id = "my-project"

[storage]
bucket = "my-project-backups"

[export]
prefix = "firestore"
download_dir = "./downloads"
"#
        .to_string()
    }

    /// Generate configuration with every option and its default
    fn generate_config_with_examples() -> String {
        r#"# fsexport configuration
#
# Values can reference environment variables with ${VAR_NAME}.
# Every key can also be overridden with FSEXPORT_<SECTION>_<KEY>,
# e.g. FSEXPORT_STORAGE_BUCKET or FSEXPORT_POLLING_INTERVAL_MS.

[application]
# trace, debug, info, warn, error
log_level = "info"

[credentials]
# Service account JSON key. Falls back to GOOGLE_APPLICATION_CREDENTIALS.
key_file = "service-account.json"
# Alternatively a pre-issued token, e.g. access_token = "${GCP_ACCESS_TOKEN}"
scopes = [
    "https://www.googleapis.com/auth/datastore",
    "https://www.googleapis.com/auth/cloud-platform",
]
# Renew cached tokens this many seconds before they expire
refresh_skew_seconds = 60

[firestore]
# Defaults to the key file's project_id
project_id = "my-project"
database_id = "(default)"
base_url = "https://firestore.googleapis.com"
# Empty exports every collection
collection_ids = []
timeout_seconds = 60

[storage]
bucket = "my-project-backups"
base_url = "https://storage.googleapis.com"
# Covers a whole object download
timeout_seconds = 300

[export]
# Objects are written to gs://{bucket}/{prefix}/
prefix = "firestore"
download_dir = "./downloads"
# Add a UTC timestamp directory below the prefix for each run
timestamp_subdirectory = false
download = true

[polling]
interval_ms = 10000
# Unset means wait until the operation finishes
# timeout_seconds = 3600
# max_attempts = 360

[logging]
local_enabled = false
local_path = "./logs"
# daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}
