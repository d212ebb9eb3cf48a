//! Error types for catalog synchronisation and listing.

use thiserror::Error;

use catalog_search_repository::SearchIndexError;

/// Errors raised while reading products from the catalog store.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog source could not be read.
    #[error("Catalog read error: {0}")]
    ReadError(String),

    /// The catalog source was read but could not be decoded.
    #[error("Catalog parse error: {0}")]
    ParseError(String),
}

impl CatalogError {
    /// Create a read error.
    pub fn read(msg: impl Into<String>) -> Self {
        Self::ReadError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

/// Errors that can occur while keeping the search index in step with the catalog.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The search index rejected an operation.
    #[error("Search index error: {0}")]
    SearchIndex(#[from] SearchIndexError),

    /// The catalog store could not supply products.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
