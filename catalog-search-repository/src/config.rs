//! Configuration types for the SearchIndexService.

/// Default maximum number of documents in a single bulk upsert.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

/// Configuration for the SearchIndexService.
///
/// Controls the bulk upsert limit used when the whole catalog is re-indexed.
#[derive(Debug, Clone)]
pub struct SearchIndexServiceConfig {
    /// Maximum number of documents allowed in a single batch operation.
    ///
    /// Set to `None` to disable the limit.
    /// Defaults to 1000 if not specified.
    pub max_batch_size: Option<usize>,
}

impl Default for SearchIndexServiceConfig {
    fn default() -> Self {
        Self {
            max_batch_size: Some(DEFAULT_MAX_BATCH_SIZE),
        }
    }
}

impl SearchIndexServiceConfig {
    /// Create a config with no batch size limit.
    pub fn unlimited() -> Self {
        Self {
            max_batch_size: None,
        }
    }

    /// Create a config with a custom batch size limit.
    ///
    /// # Arguments
    ///
    /// * `max_batch_size` - Maximum number of documents allowed in a single batch operation
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self {
            max_batch_size: Some(max_batch_size),
        }
    }
}
