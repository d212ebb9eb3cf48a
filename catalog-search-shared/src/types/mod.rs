//! This module defines the core data structures used across the catalog search.
//! It re-exports `ProductDocument` and the search query types.

pub mod product_document;
pub mod search_query;

pub use product_document::{ProductDocument, ProductId};
pub use search_query::{ProductFilter, ProductSearchQuery};
