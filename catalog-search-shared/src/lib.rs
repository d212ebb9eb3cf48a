//! # Catalog Search Shared
//!
//! This crate defines the data structures shared across the catalog search
//! crates: the indexed product document and the search query with its filters.

pub mod types;

pub use types::product_document::{ProductDocument, ProductId};
pub use types::search_query::{ProductFilter, ProductSearchQuery};
