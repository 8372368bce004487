//! Firestore Admin API request and response bodies

use serde::{Deserialize, Serialize};

/// Body of `databases/*:exportDocuments`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocumentsRequest {
    pub output_uri_prefix: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collection_ids: Vec<String>,
}

/// Minimal view of the operation returned by the trigger call
#[derive(Debug, Clone, Deserialize)]
pub struct StartedOperation {
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_empty_collections() {
        let request = ExportDocumentsRequest {
            output_uri_prefix: "gs://bucket/backups/".to_string(),
            collection_ids: vec![],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"outputUriPrefix": "gs://bucket/backups/"}));
    }

    #[test]
    fn test_request_with_collections() {
        let request = ExportDocumentsRequest {
            output_uri_prefix: "gs://bucket/".to_string(),
            collection_ids: vec!["users".to_string(), "orders".to_string()],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["collectionIds"], serde_json::json!(["users", "orders"]));
    }
}
