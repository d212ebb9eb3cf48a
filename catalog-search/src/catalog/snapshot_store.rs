//! Catalog store backed by a JSON export of the product table.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use catalog_search_shared::{ProductDocument, ProductFilter};

use super::CatalogStore;
use crate::errors::CatalogError;

/// A products file holds either a single product or an array of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProductsFile {
    Many(Vec<ProductDocument>),
    One(ProductDocument),
}

/// Read products from a JSON file.
///
/// Accepts a single product object or an array of products, using either the
/// catalog's column names or the index field names.
pub async fn read_products_file(path: &Path) -> Result<Vec<ProductDocument>, CatalogError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CatalogError::read(format!("{}: {}", path.display(), e)))?;

    let file: ProductsFile = serde_json::from_str(&raw)
        .map_err(|e| CatalogError::parse(format!("{}: {}", path.display(), e)))?;

    Ok(match file {
        ProductsFile::Many(products) => products,
        ProductsFile::One(product) => vec![product],
    })
}

/// In-memory catalog loaded from a snapshot of the product table.
///
/// Used where the relational catalog database is not reachable from this
/// process: the command-line front end and tests.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCatalogStore {
    products: Vec<ProductDocument>,
}

impl SnapshotCatalogStore {
    /// A catalog with no products.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from products already in memory.
    pub fn from_products(mut products: Vec<ProductDocument>) -> Self {
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Self { products }
    }

    /// Load a catalog snapshot from a JSON file.
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let products = read_products_file(path).await?;
        info!(
            path = %path.display(),
            product_count = products.len(),
            "Loaded catalog snapshot"
        );
        Ok(Self::from_products(products))
    }

    /// Number of products in the snapshot.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the snapshot holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl CatalogStore for SnapshotCatalogStore {
    async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductDocument>, CatalogError> {
        Ok(filter.apply(self.products.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_read_products_array() {
        let file = write_file(
            r#"[
                {"id": 2, "name": "HP Pavilion 14", "price": 62000.0, "stock": 8,
                 "active": true, "category_id": 1, "seller_id": 3},
                {"id": 1, "name": "ASUS VivoBook 15", "price": 54000.0, "stock": 10,
                 "active": true, "category_id": 1, "seller_id": 1}
            ]"#,
        );

        let products = read_products_file(file.path()).await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].brand_id, 3);
    }

    #[tokio::test]
    async fn test_read_single_product() {
        let file = write_file(
            r#"{"id": 7, "name": "Logitech G102", "price": 1990.0,
                "quantity": 30, "available": true, "category_id": 3, "brand_id": 2}"#,
        );

        let products = read_products_file(file.path()).await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 7);
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let result = read_products_file(Path::new("/nonexistent/catalog.json")).await;
        assert!(matches!(result, Err(CatalogError::ReadError(_))));
    }

    #[tokio::test]
    async fn test_read_malformed_file() {
        let file = write_file(r#"{"id": "not a number"}"#);

        let result = read_products_file(file.path()).await;

        assert!(matches!(result, Err(CatalogError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_snapshot_lists_by_name_with_filter() {
        let store = SnapshotCatalogStore::from_products(vec![
            ProductDocument::new(3, "Logitech G102", None, 1990.0, 3, 2),
            ProductDocument::new(2, "HP Pavilion 14", None, 62000.0, 1, 3),
            ProductDocument::new(1, "ASUS VivoBook 15", None, 54000.0, 1, 1),
        ]);

        let all = store.list_products(&ProductFilter::none()).await.unwrap();
        let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["ASUS VivoBook 15", "HP Pavilion 14", "Logitech G102"]);

        let laptops = store
            .list_products(&ProductFilter::none().with_category(1))
            .await
            .unwrap();
        let ids: Vec<_> = laptops.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_load_snapshot() {
        let file = write_file(
            r#"[{"id": 1, "name": "ASUS VivoBook 15", "price": 54000.0,
                 "category_id": 1, "seller_id": 1}]"#,
        );

        let store = SnapshotCatalogStore::load(file.path()).await.unwrap();

        assert_eq!(store.len(), 1);
        assert!(SnapshotCatalogStore::empty().is_empty());
    }
}
