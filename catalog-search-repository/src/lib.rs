//! # Catalog Search Repository
//!
//! This crate provides traits and implementations for interacting with the
//! product search index. It includes definitions for errors, interfaces, a
//! concrete implementation for OpenSearch, and the `SearchIndexService` used
//! by the catalog to provision the index, keep it in sync and query it.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod service;
pub mod types;

pub use config::SearchIndexServiceConfig;
pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::{IndexConfig, OpenSearchProvider};
pub use service::SearchIndexService;
pub use types::{BatchOperationResult, BatchOperationSummary};
