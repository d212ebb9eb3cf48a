//! Search query types for the catalog search.
//!
//! This module defines the query and filter structures used to search the
//! product index.

use serde::{Deserialize, Serialize};

use super::product_document::ProductDocument;

/// Optional category and seller restrictions on a product listing.
///
/// Filters are evaluated in memory against already-retrieved documents; they
/// are never sent to the search engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProductFilter {
    /// Keep only products in this category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i32>,

    /// Keep only products offered by this seller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<i32>,
}

impl ProductFilter {
    /// A filter that keeps every product.
    pub fn none() -> Self {
        Self::default()
    }

    /// Restrict to a category.
    pub fn with_category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Restrict to a seller.
    pub fn with_brand(mut self, brand_id: i32) -> Self {
        self.brand_id = Some(brand_id);
        self
    }

    /// Returns true if no restriction is set.
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none() && self.brand_id.is_none()
    }

    /// Returns true if the document satisfies every restriction.
    pub fn matches(&self, document: &ProductDocument) -> bool {
        self.category_id
            .map_or(true, |category_id| document.category_id == category_id)
            && self
                .brand_id
                .map_or(true, |brand_id| document.brand_id == brand_id)
    }

    /// Drop the documents that do not match, preserving order.
    pub fn apply(&self, documents: Vec<ProductDocument>) -> Vec<ProductDocument> {
        if self.is_empty() {
            return documents;
        }
        documents
            .into_iter()
            .filter(|doc| self.matches(doc))
            .collect()
    }
}

/// Search query parameters.
///
/// The text is matched against product names and descriptions with fuzzy
/// matching; the filter is applied to the ranked hits afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductSearchQuery {
    /// The free-text query string.
    pub query: String,

    /// Category and seller restrictions.
    #[serde(default)]
    pub filter: ProductFilter,
}

impl ProductSearchQuery {
    /// Create an unfiltered query.
    ///
    /// # Example
    ///
    /// ```
    /// use catalog_search_shared::ProductSearchQuery;
    ///
    /// let query = ProductSearchQuery::new("vivobook").with_category(1);
    /// assert_eq!(query.filter.category_id, Some(1));
    /// ```
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            filter: ProductFilter::none(),
        }
    }

    /// Replace the filter.
    pub fn with_filter(mut self, filter: ProductFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Restrict results to a category.
    pub fn with_category(mut self, category_id: i32) -> Self {
        self.filter = self.filter.with_category(category_id);
        self
    }

    /// Restrict results to a seller.
    pub fn with_brand(mut self, brand_id: i32) -> Self {
        self.filter = self.filter.with_brand(brand_id);
        self
    }

    /// Validate the query parameters.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.query.trim().is_empty() {
            return Err("Query string cannot be empty".to_string());
        }
        Ok(())
    }
}
