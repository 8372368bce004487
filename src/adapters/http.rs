//! Shared HTTP client construction

use crate::domain::{FsExportError, Result};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds a reqwest client with a per-request timeout
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(concat!("fsexport/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| FsExportError::Configuration(format!("Failed to build HTTP client: {e}")))
}

/// Reads the body of a failed response for diagnostics
pub async fn error_body(resp: reqwest::Response) -> (u16, String) {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    (status, body)
}
