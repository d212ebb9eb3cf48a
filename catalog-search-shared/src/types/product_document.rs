//! Product document types for the search index.
//!
//! This module defines the denormalized product projection that is stored in
//! the search engine.

use serde::{Deserialize, Serialize};

/// Identifier of a product, equal to the catalog store's primary key.
pub type ProductId = i64;

/// Document representation of a catalog product in the search index.
///
/// Every update replaces the whole document, so the struct always carries the
/// full projection. Field names follow the index mapping; deserialization also
/// accepts the catalog's column names (`stock`, `active`, `seller_id`) so rows
/// exported from the catalog store can be indexed as they are.
///
/// # Fields
///
/// - `id`: Catalog primary key, also used as the search document ID
/// - `name`: Product name (primary search field)
/// - `description`: Optional description text (secondary search field)
/// - `price`: Unit price
/// - `quantity`: Units in stock
/// - `available`: Whether the product is offered for sale
/// - `category_id`: Catalog category the product belongs to
/// - `brand_id`: Seller offering the product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDocument {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default, alias = "stock")]
    pub quantity: i32,
    #[serde(default = "default_available", alias = "active")]
    pub available: bool,
    pub category_id: i32,
    #[serde(alias = "seller_id")]
    pub brand_id: i32,
}

fn default_available() -> bool {
    true
}

impl ProductDocument {
    /// Create a new available document with no stock.
    ///
    /// # Example
    ///
    /// ```
    /// use catalog_search_shared::ProductDocument;
    ///
    /// let doc = ProductDocument::new(
    ///     1,
    ///     "ASUS VivoBook 15",
    ///     Some("Laptop with an Intel Core i5".to_string()),
    ///     54000.0,
    ///     1,
    ///     1,
    /// )
    /// .with_stock(10, true);
    /// assert_eq!(doc.document_id(), "1");
    /// ```
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        description: Option<String>,
        price: f64,
        category_id: i32,
        brand_id: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description,
            price,
            quantity: 0,
            available: true,
            category_id,
            brand_id,
        }
    }

    /// Set the stock level and availability flag.
    pub fn with_stock(mut self, quantity: i32, available: bool) -> Self {
        self.quantity = quantity;
        self.available = available;
        self
    }

    /// The document ID used in the search index.
    pub fn document_id(&self) -> String {
        self.id.to_string()
    }

    /// Check the document before it is written to the index.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.id <= 0 {
            return Err(format!("Product id must be positive, got {}", self.id));
        }

        if self.name.trim().is_empty() {
            return Err(format!("Product {} has an empty name", self.id));
        }

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!(
                "Product {} has an invalid price {}",
                self.id, self.price
            ));
        }

        if self.quantity < 0 {
            return Err(format!(
                "Product {} has a negative quantity {}",
                self.id, self.quantity
            ));
        }

        Ok(())
    }
}
