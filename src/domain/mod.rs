//! Domain models and types for fsexport.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`OperationName`])
//! - **Models** ([`Operation`], [`ExportDestination`], [`StoredObject`])
//! - **Error types** ([`FsExportError`], [`FirestoreError`], [`StorageError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, FsExportError>`]:
//!
//! ```rust
//! use fsexport::domain::{ExportDestination, Result};
//!
//! fn example() -> Result<()> {
//!     let destination = ExportDestination::parse("gs://my-bucket/backups/")?;
//!     assert_eq!(destination.bucket(), "my-bucket");
//!     Ok(())
//! }
//! ```

pub mod destination;
pub mod errors;
pub mod ids;
pub mod object;
pub mod operation;
pub mod result;

// Re-export commonly used types for convenience
pub use destination::ExportDestination;
pub use errors::{FirestoreError, FsExportError, StorageError};
pub use ids::OperationName;
pub use object::{DownloadedFile, StoredObject};
pub use operation::{Operation, OperationState, OperationStatus, Progress};
pub use result::Result;
