//! Result types for batch search index operations.

use catalog_search_shared::ProductId;

use crate::errors::SearchIndexError;

/// Result of a batch operation for a single product.
///
/// This struct represents the outcome of indexing one document within a batch.
/// It indicates whether the operation succeeded and includes error details if it failed.
#[derive(Debug, Clone)]
pub struct BatchOperationResult {
    /// The product's identifier.
    pub product_id: ProductId,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Error if the operation failed.
    pub error: Option<SearchIndexError>,
}

impl BatchOperationResult {
    /// A successful result for a product.
    pub fn succeeded(product_id: ProductId) -> Self {
        Self {
            product_id,
            success: true,
            error: None,
        }
    }

    /// A failed result for a product.
    pub fn failed(product_id: ProductId, error: SearchIndexError) -> Self {
        Self {
            product_id,
            success: false,
            error: Some(error),
        }
    }
}

/// Summary of a batch operation containing aggregate statistics and individual results.
///
/// Callers inspect `failed` and the per-product results to handle partial failures.
#[derive(Debug, Clone, Default)]
pub struct BatchOperationSummary {
    /// Total number of items in the batch.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Individual results for each item.
    pub results: Vec<BatchOperationResult>,
}

impl BatchOperationSummary {
    /// Build a summary from individual results.
    pub fn from_results(results: Vec<BatchOperationResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    /// Iterate over the failed results.
    pub fn failures(&self) -> impl Iterator<Item = &BatchOperationResult> {
        self.results.iter().filter(|r| !r.success)
    }
}
