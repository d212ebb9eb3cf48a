//! # Catalog Search
//!
//! Full-text product search for the catalog service, backed by an OpenSearch
//! or Elasticsearch engine. The catalog's relational store stays the source of
//! truth; this crate keeps a projection of every product in the search index.
//!
//! ## Architecture
//!
//! 1. **Catalog**: Read access to the authoritative product data
//! 2. **Sync**: Pushes product changes into the index and re-indexes on startup
//! 3. **Listing**: Serves product listings by search relevance or from the catalog
//!
//! ## Modules
//!
//! - [`catalog`]: Catalog store trait and the JSON snapshot store
//! - [`config`]: Settings and dependency initialization
//! - [`sync`]: Index synchronisation hooks
//! - [`listing`]: Product listing
//! - [`errors`]: Error types for the catalog search

pub mod catalog;
pub mod config;
pub mod errors;
pub mod listing;
pub mod sync;

pub use config::{Dependencies, Settings};
pub use errors::{CatalogError, SyncError};

use catalog_search_repository::SearchIndexError;
use thiserror::Error;

/// Errors that can occur during catalog search initialization or execution.
#[derive(Error, Debug)]
pub enum CatalogSearchError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Synchronisation error.
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Catalog error.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Search index error.
    #[error("Search index error: {0}")]
    Search(#[from] SearchIndexError),
}

impl CatalogSearchError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
