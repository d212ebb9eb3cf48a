//! Dependency initialization and wiring for the catalog search.

use std::sync::Arc;

use tracing::info;

use catalog_search_repository::{OpenSearchProvider, SearchIndexService};

use crate::catalog::{CatalogStore, SnapshotCatalogStore};
use crate::config::Settings;
use crate::listing::ProductListing;
use crate::sync::CatalogSync;
use crate::CatalogSearchError;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Settings the components were built from.
    pub settings: Settings,
    /// Search index service shared by the other components.
    pub search: Arc<SearchIndexService>,
    pub catalog: Arc<dyn CatalogStore>,
    pub sync: CatalogSync,
    pub listing: ProductListing,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// See [`Settings::from_env`] for the variables read.
    pub async fn new() -> Result<Self, CatalogSearchError> {
        Self::from_settings(Settings::from_env()).await
    }

    /// Initialize all dependencies from explicit settings.
    ///
    /// Opening the engine client does not contact the engine, so this succeeds
    /// even while the engine is down.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(CatalogSearchError)` - If the engine URL is invalid or the catalog snapshot cannot be loaded
    pub async fn from_settings(settings: Settings) -> Result<Self, CatalogSearchError> {
        info!(
            opensearch_url = %settings.opensearch_url,
            index_name = %settings.index_name,
            language = %settings.language,
            page_size = settings.page_size,
            max_batch_size = settings.max_batch_size,
            "Initializing dependencies"
        );

        let provider = OpenSearchProvider::open(&settings.opensearch_url, settings.index_config())
            .await
            .map_err(|e| CatalogSearchError::config(format!("Failed to open search client: {}", e)))?;

        let search = Arc::new(SearchIndexService::with_config(
            Arc::new(provider),
            settings.service_config(),
        ));

        let catalog: Arc<dyn CatalogStore> = match settings.catalog_snapshot_path {
            Some(ref path) => Arc::new(SnapshotCatalogStore::load(path).await?),
            None => {
                info!("No catalog snapshot configured, starting with an empty catalog");
                Arc::new(SnapshotCatalogStore::empty())
            }
        };

        let sync = CatalogSync::with_config(search.clone(), settings.sync_config());
        let listing = ProductListing::new(search.clone(), catalog.clone());

        Ok(Self {
            settings,
            search,
            catalog,
            sync,
            listing,
        })
    }
}
