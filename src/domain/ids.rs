//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers passed between the Firestore Admin
//! API and the rest of the export flow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Long-running operation name
///
/// Opaque name returned by `exportDocuments`, for example
/// `projects/my-project/databases/(default)/operations/ASA3NDEwOTg0NjExChp0`.
/// It is appended verbatim to the API base URL when polling.
///
/// # Examples
///
/// ```
/// use fsexport::domain::ids::OperationName;
/// use std::str::FromStr;
///
/// let name = OperationName::from_str("operations/abc123").unwrap();
/// assert_eq!(name.as_str(), "operations/abc123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OperationName(String);

impl OperationName {
    /// Creates a new OperationName, rejecting empty names
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        let trimmed = name.trim().trim_start_matches('/').trim();
        if trimmed.is_empty() {
            return Err("Operation name cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the operation name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OperationName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for OperationName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OperationName> for String {
    fn from(name: OperationName) -> Self {
        name.0
    }
}

impl AsRef<str> for OperationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
