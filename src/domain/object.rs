//! Stored objects and their local copies

use super::errors::StorageError;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// A remote object under the export prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    /// Full object name, e.g. `backups/all_namespaces/all_kinds/output-0`
    pub name: String,

    /// Size in bytes as reported by the listing
    pub size: u64,

    /// Content type, if set on the object
    pub content_type: Option<String>,
}

impl StoredObject {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            content_type: None,
        }
    }

    /// Zero-length "folder" markers created by some tools
    pub fn is_folder_placeholder(&self) -> bool {
        self.name.ends_with('/')
    }

    /// Local path of this object below `root`
    ///
    /// The object name's path segments are preserved. Names that would
    /// resolve outside `root` are rejected.
    pub fn local_path(&self, root: &Path) -> Result<PathBuf, StorageError> {
        let relative = Path::new(&self.name);
        if self.name.is_empty() {
            return Err(StorageError::InvalidObjectName("empty object name".to_string()));
        }

        let mut path = root.to_path_buf();
        for component in relative.components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                _ => return Err(StorageError::InvalidObjectName(self.name.clone())),
            }
        }
        Ok(path)
    }
}

/// A file written by the downloader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub object: String,
    pub path: PathBuf,
    pub bytes: u64,
}
