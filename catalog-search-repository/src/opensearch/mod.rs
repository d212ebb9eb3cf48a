//! OpenSearch implementation of the search index provider.
//!
//! This module provides a concrete implementation of `SearchIndexProvider`
//! using OpenSearch as the backend.

mod index_config;
mod provider;

pub use index_config::{
    get_index_settings, get_search_body, IndexConfig, DEFAULT_ANALYZER_LANGUAGE,
    DEFAULT_PAGE_SIZE, INDEX_NAME,
};
pub use provider::OpenSearchProvider;
