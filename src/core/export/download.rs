//! Artifact downloader
//!
//! Copies every object under an export prefix into a local directory,
//! keeping the object names' path segments.

use crate::adapters::storage::ObjectStorage;
use crate::domain::{DownloadedFile, ExportDestination, Result};
use std::path::{Path, PathBuf};

/// Downloads export artifacts to `download_dir`
pub struct ArtifactDownloader<'a> {
    storage: &'a dyn ObjectStorage,
    download_dir: PathBuf,
}

impl<'a> ArtifactDownloader<'a> {
    pub fn new(storage: &'a dyn ObjectStorage, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            download_dir: download_dir.into(),
        }
    }

    /// Lists and downloads everything under `destination`
    ///
    /// The directory is created if missing. Folder placeholder objects are
    /// skipped. An empty listing is not an error. The first failed download
    /// aborts the run; files already written are left in place.
    pub async fn download_all(&self, destination: &ExportDestination) -> Result<Vec<DownloadedFile>> {
        tokio::fs::create_dir_all(&self.download_dir).await?;

        let objects = self.storage.list_objects(destination).await?;
        tracing::info!(
            destination = %destination,
            objects = objects.len(),
            download_dir = %self.download_dir.display(),
            "Listed export artifacts"
        );

        if objects.is_empty() {
            tracing::warn!(destination = %destination, "No objects found under export prefix");
            return Ok(Vec::new());
        }

        let mut files = Vec::with_capacity(objects.len());
        for object in objects.iter().filter(|o| !o.is_folder_placeholder()) {
            let path = object.local_path(&self.download_dir)?;
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }

            let bytes = self
                .storage
                .download_object(destination.bucket(), object, &path)
                .await?;
            crate::log_download!(&object.name, path.display(), bytes);

            files.push(DownloadedFile {
                object: object.name.clone(),
                path,
                bytes,
            });
        }

        Ok(files)
    }
}
