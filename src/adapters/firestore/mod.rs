//! Firestore Admin API integration
//!
//! This module provides the export trigger and operation lookup used by the
//! export flow.

pub mod client;
pub mod models;
pub mod service;

pub use client::FirestoreAdminClient;
pub use models::ExportDocumentsRequest;
pub use service::ExportService;
