//! Export destination in Cloud Storage
//!
//! The same [`ExportDestination`] is handed to the export trigger and to the
//! downloader, so the listed prefix always matches where the export wrote.

use super::errors::StorageError;
use serde::{Deserialize, Serialize};
use std::fmt;

const GS_SCHEME: &str = "gs://";

/// Bucket plus object prefix
///
/// The prefix is normalized to either the empty string (whole bucket) or a
/// slash-terminated path without a leading slash, so listing `backups/`
/// never picks up `backups-old/`.
///
/// # Examples
///
/// ```
/// use fsexport::domain::ExportDestination;
///
/// let dest = ExportDestination::new("my-bucket", "/backups/nightly").unwrap();
/// assert_eq!(dest.prefix(), "backups/nightly/");
/// assert_eq!(dest.output_uri_prefix(), "gs://my-bucket/backups/nightly/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDestination {
    bucket: String,
    prefix: String,
}

impl ExportDestination {
    /// Creates a destination from a bucket name and an object prefix
    pub fn new(bucket: impl Into<String>, prefix: impl AsRef<str>) -> Result<Self, StorageError> {
        let bucket = bucket.into();
        let bucket = bucket.trim();
        if bucket.is_empty() {
            return Err(StorageError::InvalidUri("bucket name cannot be empty".to_string()));
        }
        if bucket.contains('/') {
            return Err(StorageError::InvalidUri(format!(
                "bucket name cannot contain '/': {bucket}"
            )));
        }

        Ok(Self {
            bucket: bucket.to_string(),
            prefix: normalize_prefix(prefix.as_ref()),
        })
    }

    /// Parses a `gs://bucket/prefix` location
    pub fn parse(uri: &str) -> Result<Self, StorageError> {
        let rest = uri
            .trim()
            .strip_prefix(GS_SCHEME)
            .ok_or_else(|| StorageError::InvalidUri(format!("expected gs:// URI, got {uri}")))?;

        let (bucket, prefix) = match rest.split_once('/') {
            Some((bucket, prefix)) => (bucket, prefix),
            None => (rest, ""),
        };
        Self::new(bucket, prefix)
    }

    /// Bucket name
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Normalized object prefix used for listing
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Value sent as `outputUriPrefix` to the export trigger
    pub fn output_uri_prefix(&self) -> String {
        format!("{GS_SCHEME}{}/{}", self.bucket, self.prefix)
    }

    /// Returns a destination one directory level deeper
    pub fn join(&self, segment: &str) -> Result<Self, StorageError> {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            return Ok(self.clone());
        }
        Self::new(self.bucket.clone(), format!("{}{segment}", self.prefix))
    }
}

impl fmt::Display for ExportDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.output_uri_prefix())
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}/")
    }
}
