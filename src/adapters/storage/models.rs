//! Cloud Storage JSON API response bodies

use crate::domain::StoredObject;
use serde::Deserialize;

/// `objects.list` response page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListObjectsResponse {
    #[serde(default)]
    pub items: Vec<ObjectResource>,

    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Subset of the object resource
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectResource {
    pub name: String,

    // uint64 is encoded as a string
    #[serde(default)]
    pub size: Option<String>,

    #[serde(default)]
    pub content_type: Option<String>,
}

impl From<ObjectResource> for StoredObject {
    fn from(resource: ObjectResource) -> Self {
        StoredObject {
            size: resource
                .size
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            name: resource.name,
            content_type: resource.content_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_page_parsing() {
        let page: ListObjectsResponse = serde_json::from_str(
            r#"{
                "kind": "storage#objects",
                "items": [
                    {"name": "p/a.txt", "size": "3", "contentType": "text/plain"},
                    {"name": "p/b.txt"}
                ],
                "nextPageToken": "CgdwL2IudHh0"
            }"#,
        )
        .unwrap();

        assert_eq!(page.next_page_token.as_deref(), Some("CgdwL2IudHh0"));
        let objects: Vec<StoredObject> = page.items.into_iter().map(Into::into).collect();
        assert_eq!(objects[0].size, 3);
        assert_eq!(objects[0].content_type.as_deref(), Some("text/plain"));
        assert_eq!(objects[1].size, 0);
    }

    #[test]
    fn test_empty_listing() {
        let page: ListObjectsResponse =
            serde_json::from_str(r#"{"kind": "storage#objects"}"#).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_page_token.is_none());
    }
}
