//! Sync module for the catalog search.
//!
//! Keeps the search index in step with the catalog store: the catalog calls
//! the `product_*` hooks after each successful write to its product table, and
//! [`CatalogSync::startup`] provisions the index and re-indexes every product.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, instrument, warn};

use catalog_search_repository::{
    BatchOperationResult, BatchOperationSummary, SearchIndexError, SearchIndexService,
};
use catalog_search_shared::{ProductDocument, ProductFilter, ProductId};

use crate::catalog::CatalogStore;
use crate::errors::SyncError;

/// Configuration for catalog synchronisation.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Number of documents sent per bulk upsert during a full re-index.
    pub batch_size: usize,
    /// Pause before provisioning, giving a freshly started engine time to boot.
    pub startup_delay: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            startup_delay: Duration::ZERO,
        }
    }
}

/// Propagates catalog product changes into the search index.
pub struct CatalogSync {
    search: Arc<SearchIndexService>,
    config: SyncConfig,
}

impl CatalogSync {
    /// Create a new sync with default configuration.
    pub fn new(search: Arc<SearchIndexService>) -> Self {
        Self {
            search,
            config: SyncConfig::default(),
        }
    }

    /// Create a new sync with custom configuration.
    pub fn with_config(search: Arc<SearchIndexService>, config: SyncConfig) -> Self {
        Self { search, config }
    }

    /// Index a product that was just created in the catalog.
    #[instrument(skip(self, product), fields(product_id = product.id))]
    pub async fn product_created(&self, product: &ProductDocument) -> Result<(), SyncError> {
        self.search.upsert(product).await?;
        Ok(())
    }

    /// Replace the indexed copy of a product that was just updated in the catalog.
    #[instrument(skip(self, product), fields(product_id = product.id))]
    pub async fn product_updated(&self, product: &ProductDocument) -> Result<(), SyncError> {
        self.search.upsert(product).await?;
        Ok(())
    }

    /// Drop a product that was just deleted from the catalog.
    #[instrument(skip(self))]
    pub async fn product_deleted(&self, product_id: ProductId) -> Result<(), SyncError> {
        self.search.remove(product_id).await?;
        Ok(())
    }

    /// Provision the index and re-index the whole catalog.
    ///
    /// An unreachable engine does not fail startup: provisioning is skipped and
    /// every product shows up as failed in the returned summary.
    #[instrument(skip(self, store))]
    pub async fn startup(&self, store: &dyn CatalogStore) -> Result<BatchOperationSummary, SyncError> {
        if !self.config.startup_delay.is_zero() {
            info!(
                delay_ms = self.config.startup_delay.as_millis() as u64,
                "Waiting for the search engine before provisioning"
            );
            tokio::time::sleep(self.config.startup_delay).await;
        }

        self.search.ensure_index().await?;
        self.reindex_all(store).await
    }

    /// Upsert every catalog product into the index.
    ///
    /// Products that fail validation are reported in the summary instead of
    /// aborting the run; the rest are sent in batches of `batch_size`.
    #[instrument(skip(self, store))]
    pub async fn reindex_all(
        &self,
        store: &dyn CatalogStore,
    ) -> Result<BatchOperationSummary, SyncError> {
        let products = store.list_products(&ProductFilter::none()).await?;
        let total = products.len();

        let mut results = Vec::with_capacity(total);
        let mut valid = Vec::with_capacity(total);
        for product in products {
            match product.validate() {
                Ok(()) => valid.push(product),
                Err(reason) => {
                    warn!(product_id = product.id, reason = %reason, "Skipping invalid catalog product");
                    results.push(BatchOperationResult::failed(
                        product.id,
                        SearchIndexError::validation(reason),
                    ));
                }
            }
        }

        let batch_size = self.config.batch_size.max(1);
        for chunk in valid.chunks(batch_size) {
            let summary = self.search.bulk_upsert(chunk.to_vec()).await?;
            results.extend(summary.results);
        }

        let summary = BatchOperationSummary::from_results(results);
        if summary.failed > 0 {
            for failure in summary.failures().take(10) {
                if let Some(ref err) = failure.error {
                    error!(product_id = failure.product_id, error = %err, "Failed to index product");
                }
            }
            warn!(
                total = summary.total,
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Catalog re-index completed with failures"
            );
        } else {
            info!(total = summary.total, "Catalog re-index completed");
        }

        Ok(summary)
    }
}
