//! Product listing.
//!
//! Backs the catalog's product-listing endpoint: a non-blank search term goes
//! to the search index, anything else lists straight from the catalog store.

use std::sync::Arc;

use tracing::debug;

use catalog_search_repository::SearchIndexService;
use catalog_search_shared::{ProductDocument, ProductFilter, ProductSearchQuery};

use crate::catalog::CatalogStore;
use crate::errors::CatalogError;

/// Lists products either by search relevance or from the catalog.
pub struct ProductListing {
    search: Arc<SearchIndexService>,
    catalog: Arc<dyn CatalogStore>,
}

impl ProductListing {
    pub fn new(search: Arc<SearchIndexService>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self { search, catalog }
    }

    /// List products for the given search term and filter.
    ///
    /// Search results keep the engine's relevance order and an unavailable
    /// engine yields an empty list. Catalog results are ordered by name.
    pub async fn list_products(
        &self,
        search_term: Option<&str>,
        filter: ProductFilter,
    ) -> Result<Vec<ProductDocument>, CatalogError> {
        match search_term.map(str::trim).filter(|term| !term.is_empty()) {
            Some(term) => {
                debug!(search_term = %term, "Listing products from the search index");
                let query = ProductSearchQuery::new(term).with_filter(filter);
                Ok(self.search.search(&query).await)
            }
            None => self.catalog.list_products(&filter).await,
        }
    }
}
