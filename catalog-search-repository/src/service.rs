//! Search index service implementation.
//!
//! This module provides the main service for interacting with the product index.
//! It plays three roles over one shared provider:
//!
//! - **Index manager**: [`SearchIndexService::ensure_index`] provisions the index at startup.
//! - **Indexer**: [`SearchIndexService::upsert`], [`SearchIndexService::remove`] and
//!   [`SearchIndexService::bulk_upsert`] keep the index in step with the catalog store.
//! - **Query engine**: [`SearchIndexService::search`] and [`SearchIndexService::try_search`].
//!
//! No call is ever retried.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use catalog_search_shared::{ProductDocument, ProductId, ProductSearchQuery};

use crate::config::SearchIndexServiceConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::types::BatchOperationSummary;

/// The main service for interacting with the product search index.
///
/// This is the high-level API that application code should use. It validates
/// input, decides which engine failures are tolerated, and delegates to a
/// `SearchIndexProvider` for the actual backend calls.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use catalog_search_repository::{IndexConfig, OpenSearchProvider, SearchIndexService};
/// use catalog_search_shared::{ProductDocument, ProductSearchQuery};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = OpenSearchProvider::open("http://localhost:9200", IndexConfig::default()).await?;
/// let service = SearchIndexService::new(Arc::new(provider));
///
/// service.ensure_index().await?;
///
/// let doc = ProductDocument::new(1, "ASUS VivoBook 15", None, 54000.0, 1, 1);
/// service.upsert(&doc).await?;
///
/// let hits = service.search(&ProductSearchQuery::new("vivobook")).await;
/// # Ok(())
/// # }
/// ```
pub struct SearchIndexService {
    provider: Arc<dyn SearchIndexProvider>,
    config: SearchIndexServiceConfig,
}

impl SearchIndexService {
    /// Create a new SearchIndexService with default configuration.
    ///
    /// The default configuration includes a batch size limit of 1000 documents.
    ///
    /// # Arguments
    ///
    /// * `provider` - A shared implementation of `SearchIndexProvider` (e.g., `OpenSearchProvider`)
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self {
            provider,
            config: SearchIndexServiceConfig::default(),
        }
    }

    /// Create a new SearchIndexService with custom configuration.
    pub fn with_config(
        provider: Arc<dyn SearchIndexProvider>,
        config: SearchIndexServiceConfig,
    ) -> Self {
        Self { provider, config }
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), SearchIndexError> {
        if let Some(max) = self.config.max_batch_size {
            if size > max {
                return Err(SearchIndexError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }

    fn validate_document(document: &ProductDocument) -> Result<(), SearchIndexError> {
        document.validate().map_err(SearchIndexError::validation)
    }

    /// Make sure the product index exists, creating it with its analyzers if absent.
    ///
    /// An existing index is left untouched, so analyzer changes are never
    /// migrated. Startup must not depend on the engine being up: when the engine
    /// cannot be reached, or the existence check fails, the problem is logged and
    /// `Ok(())` is returned so the rest of the catalog keeps serving.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index exists, was created, or the engine is unavailable
    /// * `Err(SearchIndexError)` - If the engine refused to create the index
    pub async fn ensure_index(&self) -> Result<(), SearchIndexError> {
        let exists = match self.provider.index_exists().await {
            Ok(exists) => exists,
            Err(e) if e.is_connection() => {
                warn!(error = %e, "Search engine unavailable, skipping index provisioning");
                return Ok(());
            }
            Err(e) => {
                error!(error = %e, "Failed to check whether the search index exists");
                return Ok(());
            }
        };

        if exists {
            debug!("Search index already exists");
            return Ok(());
        }

        info!("Creating search index");
        match self.provider.create_index().await {
            Ok(()) => Ok(()),
            Err(e) if e.is_connection() => {
                warn!(error = %e, "Search engine became unavailable while creating the index");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Write a product document, replacing any previous version with the same id.
    ///
    /// The id must be the catalog's primary key; it is never derived here.
    /// Searches observe the change once the engine refreshes the index.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was written
    /// * `Err(SearchIndexError::ValidationError)` - If the document is malformed
    /// * `Err(SearchIndexError)` - If the engine call fails
    pub async fn upsert(&self, document: &ProductDocument) -> Result<(), SearchIndexError> {
        Self::validate_document(document)?;
        self.provider.index_document(document).await
    }

    /// Delete a product document.
    ///
    /// Deleting a product that is not indexed is not an error.
    pub async fn remove(&self, product_id: ProductId) -> Result<(), SearchIndexError> {
        self.provider.delete_document(product_id).await
    }

    /// Write many product documents and return a summary of successful and failed operations.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchOperationSummary)` - Per-document results; individual failures do not fail the call
    /// * `Err(SearchIndexError::BatchSizeExceeded)` - If the batch size exceeds the configured maximum
    /// * `Err(SearchIndexError::ValidationError)` - If any document is malformed
    pub async fn bulk_upsert(
        &self,
        documents: Vec<ProductDocument>,
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        if documents.is_empty() {
            return Ok(BatchOperationSummary::default());
        }

        self.validate_batch_size(documents.len())?;

        for document in &documents {
            Self::validate_document(document)?;
        }

        self.provider.bulk_index_documents(&documents).await
    }

    /// Search products and report engine failures to the caller.
    ///
    /// Hits come back in engine relevance order. The category and seller filter
    /// is applied afterwards to that single page of hits, so a filtered result
    /// can be shorter than the page size even when more matching products exist.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ProductDocument>)` - Matching documents, possibly empty
    /// * `Err(SearchIndexError::ValidationError)` - If the query text is blank
    /// * `Err(SearchIndexError)` - If the engine is unreachable or rejects the query
    pub async fn try_search(
        &self,
        query: &ProductSearchQuery,
    ) -> Result<Vec<ProductDocument>, SearchIndexError> {
        query.validate().map_err(SearchIndexError::validation)?;

        let hits = self.provider.search(&query.query).await?;
        let candidates = hits.len();
        let documents = query.filter.apply(hits);

        debug!(
            query = %query.query,
            candidates = candidates,
            returned = documents.len(),
            "Product search completed"
        );
        Ok(documents)
    }

    /// Search products, treating any failure as "no matches".
    ///
    /// Failures are logged. Use [`SearchIndexService::try_search`] to tell an
    /// unavailable engine apart from an empty result.
    pub async fn search(&self, query: &ProductSearchQuery) -> Vec<ProductDocument> {
        match self.try_search(query).await {
            Ok(documents) => documents,
            Err(e) => {
                error!(query = %query.query, error = %e, "Product search failed");
                Vec::new()
            }
        }
    }

    /// Release the underlying provider.
    pub async fn close(&self) -> Result<(), SearchIndexError> {
        self.provider.close().await
    }
}
