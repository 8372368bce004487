//! Object storage trait

use crate::domain::{ExportDestination, Result, StoredObject};
use async_trait::async_trait;
use std::path::Path;

/// List and download access to a bucket
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Lists every object under the destination prefix, across all pages
    async fn list_objects(&self, destination: &ExportDestination) -> Result<Vec<StoredObject>>;

    /// Writes the object's content to `target`, returning the byte count
    ///
    /// `target`'s parent directory must exist.
    async fn download_object(&self, bucket: &str, object: &StoredObject, target: &Path)
        -> Result<u64>;
}
