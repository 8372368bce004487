//! Long-running operation model
//!
//! Mirrors the `google.longrunning.Operation` resource returned by the
//! Firestore Admin API. Only `name`, `done` and `error` drive the export
//! flow; `metadata` and `response` are kept as raw JSON.

use super::ids::OperationName;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snapshot of a long-running operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Operation {
    /// Operation name
    pub name: OperationName,

    /// Whether the operation has finished, successfully or not
    #[serde(default)]
    pub done: bool,

    /// Service-specific metadata (progress counters, state, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    /// Error status, set when a finished operation failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationStatus>,

    /// Result payload, set when a finished operation succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

/// `google.rpc.Status` as carried in `Operation.error`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationStatus {
    #[serde(default)]
    pub code: i32,

    #[serde(default)]
    pub message: String,
}

/// Completed/estimated work counters from the operation metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: u64,
    pub estimated: u64,
}

impl Progress {
    /// Completion percentage, if the estimate is known
    pub fn percent(&self) -> Option<f64> {
        if self.estimated == 0 {
            None
        } else {
            Some(self.completed as f64 / self.estimated as f64 * 100.0)
        }
    }
}

/// Coarse operation state used by the monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationState {
    InProgress,
    Done,
}

impl Operation {
    /// Coarse state of the operation
    pub fn state(&self) -> OperationState {
        if self.done {
            OperationState::Done
        } else {
            OperationState::InProgress
        }
    }

    /// Service-reported state string (`PROCESSING`, `SUCCESSFUL`, ...)
    pub fn reported_state(&self) -> Option<&str> {
        self.metadata.as_ref()?.get("operationState")?.as_str()
    }

    /// Document progress counters
    pub fn document_progress(&self) -> Option<Progress> {
        self.progress("progressDocuments")
    }

    /// Byte progress counters
    pub fn byte_progress(&self) -> Option<Progress> {
        self.progress("progressBytes")
    }

    /// Location the export actually wrote to, if the service reported it
    pub fn output_uri_prefix(&self) -> Option<&str> {
        self.response
            .as_ref()
            .and_then(|r| r.get("outputUriPrefix"))
            .or_else(|| self.metadata.as_ref()?.get("outputUriPrefix"))
            .and_then(Value::as_str)
    }

    fn progress(&self, key: &str) -> Option<Progress> {
        let progress = self.metadata.as_ref()?.get(key)?;
        Some(Progress {
            completed: json_u64(progress.get("completedWork"))?,
            estimated: json_u64(progress.get("estimatedWork")).unwrap_or(0),
        })
    }
}

// int64 fields are encoded as JSON strings by the REST API
fn json_u64(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
