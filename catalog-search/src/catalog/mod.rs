//! Catalog store module.
//!
//! The catalog store is the authoritative source of product data; the search
//! index only holds a projection of it. The relational database behind the
//! catalog lives outside this crate, so it is reached through the
//! [`CatalogStore`] trait.

mod snapshot_store;

pub use snapshot_store::{read_products_file, SnapshotCatalogStore};

use async_trait::async_trait;

use catalog_search_shared::{ProductDocument, ProductFilter};

use crate::errors::CatalogError;

/// Read access to the catalog's products.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// List products matching the filter, ordered by name.
    async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductDocument>, CatalogError>;
}
