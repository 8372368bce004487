//! Cloud Storage integration
//!
//! Lists and downloads the files an export wrote.

pub mod client;
pub mod models;
pub mod service;

pub use client::GcsClient;
pub use service::ObjectStorage;
