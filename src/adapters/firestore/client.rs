//! Firestore Admin REST client
//!
//! Talks to the v1 REST surface:
//! - `POST {base}/v1/projects/{project}/databases/{database}:exportDocuments`
//! - `GET {base}/v1/{operation_name}`

use super::models::{ExportDocumentsRequest, StartedOperation};
use super::service::ExportService;
use crate::adapters::auth::TokenProvider;
use crate::adapters::http::{build_http_client, error_body};
use crate::config::FirestoreConfig;
use crate::domain::{
    ExportDestination, FirestoreError, FsExportError, Operation, OperationName, Result,
};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Firestore Admin API client for one database
pub struct FirestoreAdminClient {
    base_url: String,
    project_id: String,
    database_id: String,
    client: Client,
    tokens: Arc<dyn TokenProvider>,
}

impl FirestoreAdminClient {
    /// Creates a client for `project_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        config: &FirestoreConfig,
        project_id: impl Into<String>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            database_id: config.database_id.clone(),
            client: build_http_client(Duration::from_secs(config.timeout_seconds))?,
            tokens,
        })
    }

    /// Resource name of the database, `projects/{p}/databases/{d}`
    pub fn database_name(&self) -> String {
        format!("projects/{}/databases/{}", self.project_id, self.database_id)
    }

    fn export_url(&self) -> String {
        format!("{}/v1/{}:exportDocuments", self.base_url, self.database_name())
    }

    fn operation_url(&self, name: &OperationName) -> String {
        format!("{}/v1/{}", self.base_url, name.as_str())
    }
}

#[async_trait]
impl ExportService for FirestoreAdminClient {
    async fn start_export(
        &self,
        destination: &ExportDestination,
        collection_ids: &[String],
    ) -> Result<OperationName> {
        let url = self.export_url();
        let body = ExportDocumentsRequest {
            output_uri_prefix: destination.output_uri_prefix(),
            collection_ids: collection_ids.to_vec(),
        };

        tracing::debug!(
            url = %url,
            output_uri_prefix = %body.output_uri_prefix,
            collections = ?body.collection_ids,
            "Requesting Firestore export"
        );

        let token = self.tokens.access_token().await?;
        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, token.bearer())
            .json(&body)
            .send()
            .await
            .map_err(|e| FirestoreError::ConnectionFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let (status, body) = error_body(resp).await;
            return Err(FirestoreError::ExportTriggerFailed { status, body }.into());
        }

        let started: StartedOperation = resp
            .json()
            .await
            .map_err(|e| FirestoreError::InvalidResponse(e.to_string()))?;

        let name = started.name.ok_or_else(|| {
            FirestoreError::InvalidResponse("export response has no operation name".to_string())
        })?;

        OperationName::new(name).map_err(|e| FsExportError::from(FirestoreError::InvalidResponse(e)))
    }

    async fn get_operation(&self, name: &OperationName) -> Result<Operation> {
        let url = self.operation_url(name);
        let token = self.tokens.access_token().await?;

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, token.bearer())
            .send()
            .await
            .map_err(|e| FirestoreError::ConnectionFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let (status, body) = error_body(resp).await;
            return Err(FirestoreError::OperationMonitoringFailed { status, body }.into());
        }

        let operation = resp
            .json::<Operation>()
            .await
            .map_err(|e| FirestoreError::InvalidResponse(e.to_string()))?;
        Ok(operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::StaticTokenProvider;
    use crate::config::secret_string;

    fn client(base_url: &str) -> FirestoreAdminClient {
        let config = FirestoreConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        let tokens = Arc::new(StaticTokenProvider::new(secret_string("t".to_string())));
        FirestoreAdminClient::new(&config, "my-project", tokens).unwrap()
    }

    #[test]
    fn test_urls() {
        let client = client("https://firestore.googleapis.com/");
        assert_eq!(client.database_name(), "projects/my-project/databases/(default)");
        assert_eq!(
            client.export_url(),
            "https://firestore.googleapis.com/v1/projects/my-project/databases/(default):exportDocuments"
        );
        let op = OperationName::new("projects/my-project/databases/(default)/operations/abc").unwrap();
        assert_eq!(
            client.operation_url(&op),
            "https://firestore.googleapis.com/v1/projects/my-project/databases/(default)/operations/abc"
        );
    }

    #[tokio::test]
    async fn test_start_export_without_name_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/projects/my-project/databases/(default):exportDocuments")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let dest = ExportDestination::new("b", "p").unwrap();
        let result = client(&server.url()).start_export(&dest, &[]).await;
        assert!(matches!(
            result,
            Err(FsExportError::Firestore(FirestoreError::InvalidResponse(_)))
        ));
    }

    #[tokio::test]
    async fn test_start_export_with_slash_name_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/projects/my-project/databases/(default):exportDocuments")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "/"}"#)
            .create_async()
            .await;

        let dest = ExportDestination::new("b", "p").unwrap();
        let result = client(&server.url()).start_export(&dest, &[]).await;
        assert!(matches!(
            result,
            Err(FsExportError::Firestore(FirestoreError::InvalidResponse(_)))
        ));
    }

    #[tokio::test]
    async fn test_get_operation_sends_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/v1/operations/abc")
            .match_header("authorization", "Bearer t")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "operations/abc", "done": true}"#)
            .create_async()
            .await;

        let op = client(&server.url())
            .get_operation(&OperationName::new("operations/abc").unwrap())
            .await
            .unwrap();
        assert!(op.done);
        m.assert_async().await;
    }
}
