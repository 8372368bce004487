//! Result type alias for fsexport

use super::errors::FsExportError;

/// Result type alias for fsexport operations
///
/// # Examples
///
/// ```
/// use fsexport::domain::result::Result;
/// use fsexport::domain::errors::FsExportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(FsExportError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, FsExportError>;
