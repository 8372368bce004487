//! End-to-end export flow against mocked Google APIs
//!
//! These tests verify that:
//! - The trigger, poll and download steps run in order
//! - A failed step stops every later step
//! - Polling is bounded by `max_attempts`

use fsexport::config::{
    secret_string, CredentialsConfig, ExportConfig, FirestoreConfig, FsExportConfig,
    PollingConfig, StorageConfig,
};
use fsexport::core::export::ExportCoordinator;
use fsexport::domain::{FirestoreError, FsExportError};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;
use tokio::sync::watch;

const EXPORT_PATH: &str = "/v1/projects/proj/databases/(default):exportDocuments";
const OPERATION_PATH: &str = "/v1/operations/abc123";
const LIST_PATH: &str = "/storage/v1/b/bucket/o";
const BEARER: &str = "Bearer test-token";

fn config(server: &ServerGuard, download_dir: &Path) -> FsExportConfig {
    FsExportConfig {
        application: Default::default(),
        credentials: CredentialsConfig {
            access_token: Some(secret_string("test-token".to_string())),
            ..CredentialsConfig::default()
        },
        firestore: FirestoreConfig {
            project_id: Some("proj".to_string()),
            base_url: server.url(),
            ..FirestoreConfig::default()
        },
        storage: StorageConfig {
            bucket: "bucket".to_string(),
            base_url: server.url(),
            timeout_seconds: 10,
        },
        export: ExportConfig {
            prefix: "p".to_string(),
            download_dir: download_dir.display().to_string(),
            ..ExportConfig::default()
        },
        polling: PollingConfig {
            interval_ms: 10,
            timeout_seconds: None,
            max_attempts: Some(20),
        },
        logging: Default::default(),
    }
}

fn coordinator(config: FsExportConfig) -> (watch::Sender<bool>, ExportCoordinator) {
    let (tx, rx) = watch::channel(false);
    let coordinator = ExportCoordinator::new(config, rx).unwrap();
    (tx, coordinator)
}

async fn mock_trigger(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("POST", EXPORT_PATH)
        .match_header("authorization", BEARER)
        .match_body(Matcher::PartialJson(json!({"outputUriPrefix": "gs://bucket/p/"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"name": "operations/abc123"}"#)
        .expect(1)
        .create_async()
        .await
}

fn running_operation() -> String {
    json!({
        "name": "operations/abc123",
        "done": false,
        "metadata": {
            "operationState": "PROCESSING",
            "progressDocuments": {"completedWork": "10", "estimatedWork": "40"}
        }
    })
    .to_string()
}

fn finished_operation() -> String {
    json!({
        "name": "operations/abc123",
        "done": true,
        "metadata": {"operationState": "SUCCESSFUL"},
        "response": {"outputUriPrefix": "gs://bucket/p"}
    })
    .to_string()
}

#[tokio::test]
async fn test_export_poll_and_download() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let trigger = mock_trigger(&mut server).await;
    let running = server
        .mock("GET", OPERATION_PATH)
        .match_header("authorization", BEARER)
        .with_status(200)
        .with_body(running_operation())
        .expect(2)
        .create_async()
        .await;
    let finished = server
        .mock("GET", OPERATION_PATH)
        .with_status(200)
        .with_body(finished_operation())
        .expect(1)
        .create_async()
        .await;
    let list = server
        .mock("GET", LIST_PATH)
        .match_query(Matcher::UrlEncoded("prefix".into(), "p/".into()))
        .with_status(200)
        .with_body(
            json!({"items": [
                {"name": "p/a.txt", "size": "5"},
                {"name": "p/b.txt", "size": "4"}
            ]})
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let media_a = server
        .mock("GET", Matcher::Regex(r"^/storage/v1/b/bucket/o/p(%2F|/)a\.txt$".into()))
        .match_query(Matcher::UrlEncoded("alt".into(), "media".into()))
        .match_header("authorization", BEARER)
        .with_status(200)
        .with_body("alpha")
        .expect(1)
        .create_async()
        .await;
    let media_b = server
        .mock("GET", Matcher::Regex(r"^/storage/v1/b/bucket/o/p(%2F|/)b\.txt$".into()))
        .match_query(Matcher::UrlEncoded("alt".into(), "media".into()))
        .with_status(200)
        .with_body("beta")
        .expect(1)
        .create_async()
        .await;

    let (_tx, coordinator) = coordinator(config(&server, dir.path()));
    let summary = coordinator.execute_export().await.unwrap();

    assert_eq!(summary.operation_name.as_str(), "operations/abc123");
    assert_eq!(summary.poll_attempts, 3);
    assert_eq!(summary.files.len(), 2);
    assert_eq!(summary.bytes_downloaded(), 9);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("p").join("a.txt")).unwrap(),
        "alpha"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("p").join("b.txt")).unwrap(),
        "beta"
    );

    trigger.assert_async().await;
    running.assert_async().await;
    finished.assert_async().await;
    list.assert_async().await;
    media_a.assert_async().await;
    media_b.assert_async().await;
}

#[tokio::test]
async fn test_trigger_failure_never_polls() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let trigger = server
        .mock("POST", EXPORT_PATH)
        .with_status(403)
        .with_body(r#"{"error": {"code": 403, "message": "permission denied"}}"#)
        .expect(1)
        .create_async()
        .await;
    let poll = server
        .mock("GET", OPERATION_PATH)
        .expect(0)
        .create_async()
        .await;

    let (_tx, coordinator) = coordinator(config(&server, dir.path()));
    let err = coordinator.execute_export().await.unwrap_err();

    match &err {
        FsExportError::Firestore(FirestoreError::ExportTriggerFailed { status, body }) => {
            assert_eq!(*status, 403);
            assert!(body.contains("permission denied"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.exit_code(), 5);
    trigger.assert_async().await;
    poll.assert_async().await;
}

#[tokio::test]
async fn test_poll_failure_skips_download() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let _trigger = mock_trigger(&mut server).await;
    let poll = server
        .mock("GET", OPERATION_PATH)
        .with_status(500)
        .with_body("internal")
        .expect(1)
        .create_async()
        .await;
    let list = server
        .mock("GET", LIST_PATH)
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let (_tx, coordinator) = coordinator(config(&server, dir.path()));
    let err = coordinator.execute_export().await.unwrap_err();

    assert!(matches!(
        err,
        FsExportError::Firestore(FirestoreError::OperationMonitoringFailed { status: 500, .. })
    ));
    poll.assert_async().await;
    list.assert_async().await;
    assert!(!dir.path().join("p").exists());
}

#[tokio::test]
async fn test_max_attempts_bounds_polling() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let _trigger = mock_trigger(&mut server).await;
    let poll = server
        .mock("GET", OPERATION_PATH)
        .with_status(200)
        .with_body(running_operation())
        .expect(3)
        .create_async()
        .await;

    let mut cfg = config(&server, dir.path());
    cfg.polling.max_attempts = Some(3);
    let (_tx, coordinator) = coordinator(cfg);
    let err = coordinator.execute_export().await.unwrap_err();

    assert!(matches!(err, FsExportError::PollTimeout { attempts: 3, .. }));
    assert_eq!(err.exit_code(), 5);
    poll.assert_async().await;
}

#[tokio::test]
async fn test_failed_operation_is_reported() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let _trigger = mock_trigger(&mut server).await;
    let _poll = server
        .mock("GET", OPERATION_PATH)
        .with_status(200)
        .with_body(
            json!({
                "name": "operations/abc123",
                "done": true,
                "error": {"code": 7, "message": "bucket not writable"}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let (_tx, coordinator) = coordinator(config(&server, dir.path()));
    let err = coordinator.execute_export().await.unwrap_err();

    assert!(err.to_string().contains("bucket not writable"));
}

#[tokio::test]
async fn test_shutdown_interrupts_polling() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let _trigger = mock_trigger(&mut server).await;
    let _poll = server
        .mock("GET", OPERATION_PATH)
        .with_status(200)
        .with_body(running_operation())
        .expect_at_least(1)
        .create_async()
        .await;

    let mut cfg = config(&server, dir.path());
    cfg.polling.interval_ms = 60_000;
    cfg.polling.max_attempts = None;
    let (tx, coordinator) = coordinator(cfg);

    let signal = tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        let _ = tx.send(true);
        tx
    });

    let err = coordinator.execute_export().await.unwrap_err();
    assert!(matches!(err, FsExportError::Interrupted(_)));
    assert_eq!(err.exit_code(), 130);
    drop(signal.await.unwrap());
}
