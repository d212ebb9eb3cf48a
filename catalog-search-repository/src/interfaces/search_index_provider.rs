//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use catalog_search_shared::{ProductDocument, ProductId};

use crate::errors::SearchIndexError;
use crate::types::{BatchOperationResult, BatchOperationSummary};

/// Abstracts the underlying search engine (OpenSearch, Elasticsearch, etc.).
///
/// Implementations are injected into `SearchIndexService` as a shared handle, so a
/// single client serves index provisioning, indexing and querying. Each method
/// issues independent requests and must be safe to call concurrently.
///
/// Providers report what the engine said; deciding which failures are tolerable
/// (an unreachable engine at startup, a missing document on delete) is left to
/// `SearchIndexService`, except where noted.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Check whether the product index exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` / `Ok(false)` - Whether the index is present
    /// * `Err(SearchIndexError::ConnectionError)` - If the engine is unreachable
    /// * `Err(SearchIndexError)` - If the engine answered with an unexpected status
    async fn index_exists(&self) -> Result<bool, SearchIndexError>;

    /// Create the product index with its analysis settings and mappings.
    ///
    /// An index created concurrently by another process counts as success.
    async fn create_index(&self) -> Result<(), SearchIndexError>;

    /// Write a document under its product id, replacing any previous version.
    async fn index_document(&self, document: &ProductDocument) -> Result<(), SearchIndexError>;

    /// Delete the document with the given product id.
    ///
    /// If the document doesn't exist, the operation is considered successful.
    async fn delete_document(&self, product_id: ProductId) -> Result<(), SearchIndexError>;

    /// Run a fuzzy full-text query over product names and descriptions.
    ///
    /// Returns one engine page of hits in relevance order, without any filtering.
    async fn search(&self, query: &str) -> Result<Vec<ProductDocument>, SearchIndexError>;

    /// Index multiple documents and return a summary of successful and failed operations.
    ///
    /// The default implementation calls `index_document` once per document.
    async fn bulk_index_documents(
        &self,
        documents: &[ProductDocument],
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        let mut results = Vec::with_capacity(documents.len());

        for document in documents {
            match self.index_document(document).await {
                Ok(()) => results.push(BatchOperationResult::succeeded(document.id)),
                Err(e) => results.push(BatchOperationResult::failed(document.id, e)),
            }
        }

        Ok(BatchOperationSummary::from_results(results))
    }

    /// Release the underlying client.
    async fn close(&self) -> Result<(), SearchIndexError> {
        Ok(())
    }
}
