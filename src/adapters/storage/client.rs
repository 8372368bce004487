//! Cloud Storage JSON API client
//!
//! - `GET {base}/storage/v1/b/{bucket}/o?prefix=...&pageToken=...`
//! - `GET {base}/storage/v1/b/{bucket}/o/{object}?alt=media`

use super::models::ListObjectsResponse;
use super::service::ObjectStorage;
use crate::adapters::auth::TokenProvider;
use crate::adapters::http::{build_http_client, error_body};
use crate::config::StorageConfig;
use crate::domain::{ExportDestination, Result, StorageError, StoredObject};
use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Google Cloud Storage client
pub struct GcsClient {
    base_url: String,
    client: Client,
    tokens: Arc<dyn TokenProvider>,
}

impl GcsClient {
    /// Creates a client from configuration
    pub fn new(config: &StorageConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: build_http_client(Duration::from_secs(config.timeout_seconds))?,
            tokens,
        })
    }

    fn objects_url(&self, bucket: &str) -> Result<Url> {
        let mut url = self.parse_base()?;
        url.path_segments_mut()
            .map_err(|_| StorageError::InvalidUri(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["storage", "v1", "b", bucket, "o"]);
        Ok(url)
    }

    /// Media URL of an object; `/` inside the name is percent-encoded
    fn media_url(&self, bucket: &str, object: &str) -> Result<Url> {
        let mut url = self.objects_url(bucket)?;
        url.path_segments_mut()
            .map_err(|_| StorageError::InvalidUri(self.base_url.clone()))?
            .push(object);
        url.query_pairs_mut().append_pair("alt", "media");
        Ok(url)
    }

    fn parse_base(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| StorageError::InvalidUri(format!("{}: {e}", self.base_url)).into())
    }
}

#[async_trait]
impl ObjectStorage for GcsClient {
    async fn list_objects(&self, destination: &ExportDestination) -> Result<Vec<StoredObject>> {
        let bucket = destination.bucket();
        let mut objects = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.objects_url(bucket)?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("prefix", destination.prefix());
                if let Some(token) = &page_token {
                    query.append_pair("pageToken", token);
                }
            }

            let token = self.tokens.access_token().await?;
            let resp = self
                .client
                .get(url)
                .header(reqwest::header::AUTHORIZATION, token.bearer())
                .send()
                .await
                .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

            if !resp.status().is_success() {
                let (status, body) = error_body(resp).await;
                return Err(StorageError::ListFailed {
                    bucket: bucket.to_string(),
                    status,
                    body,
                }
                .into());
            }

            let page: ListObjectsResponse = resp
                .json()
                .await
                .map_err(|e| StorageError::InvalidResponse(e.to_string()))?;

            tracing::debug!(
                bucket = %bucket,
                prefix = %destination.prefix(),
                page_items = page.items.len(),
                "Listed object page"
            );

            objects.extend(page.items.into_iter().map(StoredObject::from));

            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        Ok(objects)
    }

    async fn download_object(
        &self,
        bucket: &str,
        object: &StoredObject,
        target: &Path,
    ) -> Result<u64> {
        let url = self.media_url(bucket, &object.name)?;
        let token = self.tokens.access_token().await?;

        let mut resp = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, token.bearer())
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let (status, body) = error_body(resp).await;
            return Err(StorageError::DownloadFailed {
                object: object.name.clone(),
                status,
                body,
            }
            .into());
        }

        let mut file = tokio::fs::File::create(target).await?;
        let mut written: u64 = 0;
        while let Some(chunk) = resp
            .chunk()
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::StaticTokenProvider;
    use crate::config::secret_string;

    fn client(base_url: &str) -> GcsClient {
        let config = StorageConfig {
            bucket: "bucket".to_string(),
            base_url: base_url.to_string(),
            timeout_seconds: 10,
        };
        let tokens = Arc::new(StaticTokenProvider::new(secret_string("t".to_string())));
        GcsClient::new(&config, tokens).unwrap()
    }

    #[test]
    fn test_media_url_encodes_object_name() {
        let client = client("https://storage.googleapis.com");
        let url = client.media_url("my-bucket", "backups/p/a b.txt").unwrap();
        assert_eq!(
            url.as_str(),
            "https://storage.googleapis.com/storage/v1/b/my-bucket/o/backups%2Fp%2Fa%20b.txt?alt=media"
        );
    }

    #[test]
    fn test_objects_url_with_base_path() {
        let client = client("http://localhost:4443/");
        let url = client.objects_url("b").unwrap();
        assert_eq!(url.as_str(), "http://localhost:4443/storage/v1/b/b/o");
    }

    #[tokio::test]
    async fn test_list_follows_page_tokens() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/storage/v1/b/bucket/o")
            .match_query(mockito::Matcher::Regex("^prefix=[^&]*$".into()))
            .with_status(200)
            .with_body(r#"{"items": [{"name": "p/a.txt", "size": "1"}], "nextPageToken": "next"}"#)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/storage/v1/b/bucket/o")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("prefix".into(), "p/".into()),
                mockito::Matcher::UrlEncoded("pageToken".into(), "next".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"items": [{"name": "p/b.txt", "size": "2"}]}"#)
            .create_async()
            .await;

        let dest = ExportDestination::new("bucket", "p").unwrap();
        let objects = client(&server.url()).list_objects(&dest).await.unwrap();

        let names: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["p/a.txt", "p/b.txt"]);
        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_failure_surfaces_status() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/storage/v1/b/bucket/o")
            .match_query(mockito::Matcher::Any)
            .with_status(403)
            .with_body("forbidden")
            .create_async()
            .await;

        let dest = ExportDestination::new("bucket", "p").unwrap();
        let err = client(&server.url()).list_objects(&dest).await.unwrap_err();
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("forbidden"));
    }
}
