//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings, mappings and query body for the
//! product catalog index.

use serde_json::{json, Value};

/// The name of the product index shared by every caller.
pub const INDEX_NAME: &str = "products_catalog";

/// Language of the stopword and stemmer filters.
pub const DEFAULT_ANALYZER_LANGUAGE: &str = "russian";

/// Number of hits requested per search, matching the engine default.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Name of the index-time analyzer applied to product text fields.
pub const AUTOCOMPLETE_ANALYZER: &str = "autocomplete";

/// Shortest prefix emitted by the edge n-gram filter.
pub const EDGE_NGRAM_MIN_GRAM: u32 = 2;

/// Longest prefix emitted by the edge n-gram filter.
pub const EDGE_NGRAM_MAX_GRAM: u32 = 20;

/// Configuration for the search index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// The index name used for all operations.
    pub index_name: String,
    /// Language of the stopword list and stemmer (e.g. "russian", "english").
    pub language: String,
    /// Number of hits requested per search.
    pub page_size: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            index_name: INDEX_NAME.to_string(),
            language: DEFAULT_ANALYZER_LANGUAGE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl IndexConfig {
    /// Create a new index configuration.
    ///
    /// # Arguments
    ///
    /// * `index_name` - The index name
    /// * `language` - Analyzer language for stopwords and stemming
    /// * `page_size` - Number of hits requested per search
    pub fn new(index_name: impl Into<String>, language: impl Into<String>, page_size: usize) -> Self {
        Self {
            index_name: index_name.into(),
            language: language.into(),
            page_size,
        }
    }
}

/// Get the index settings and mappings for the product index.
///
/// Text fields are indexed through the `autocomplete` analyzer: standard
/// tokenizer, lowercase, stopword removal, stemming, then edge n-grams so that
/// partial words match. Queries use the plain `standard` analyzer so search
/// terms are not expanded into n-grams themselves.
///
/// # Arguments
///
/// * `language` - Language of the stopword list and stemmer
pub fn get_index_settings(language: &str) -> Value {
    let stop_filter = format!("{}_stop", language);
    let stemmer_filter = format!("{}_stemmer", language);

    json!({
        "settings": {
            "analysis": {
                "filter": {
                    "autocomplete_filter": {
                        "type": "edge_ngram",
                        "min_gram": EDGE_NGRAM_MIN_GRAM,
                        "max_gram": EDGE_NGRAM_MAX_GRAM
                    },
                    stop_filter.clone(): {
                        "type": "stop",
                        "stopwords": format!("_{}_", language)
                    },
                    stemmer_filter.clone(): {
                        "type": "stemmer",
                        "language": language
                    }
                },
                "analyzer": {
                    AUTOCOMPLETE_ANALYZER: {
                        "type": "custom",
                        "tokenizer": "standard",
                        "filter": [
                            "lowercase",
                            stop_filter,
                            stemmer_filter,
                            "autocomplete_filter"
                        ]
                    }
                }
            }
        },
        "mappings": {
            "properties": {
                "name": {
                    "type": "text",
                    "analyzer": AUTOCOMPLETE_ANALYZER,
                    "search_analyzer": "standard"
                },
                "description": {
                    "type": "text",
                    "analyzer": AUTOCOMPLETE_ANALYZER,
                    "search_analyzer": "standard"
                },
                "price": { "type": "float" },
                "quantity": { "type": "integer" },
                "available": { "type": "boolean" },
                "category_id": { "type": "integer" },
                "brand_id": { "type": "integer" }
            }
        }
    })
}

/// Build the search request body for a free-text product query.
///
/// A `multi_match` over name and description with `AUTO` fuzziness; ranking is
/// left to the engine's default relevance scoring.
pub fn get_search_body(query: &str, size: usize) -> Value {
    json!({
        "size": size,
        "query": {
            "multi_match": {
                "query": query,
                "fields": ["name", "description"],
                "fuzziness": "AUTO"
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_analysis() {
        let settings = get_index_settings("russian");
        let analysis = &settings["settings"]["analysis"];

        assert_eq!(analysis["filter"]["autocomplete_filter"]["type"], "edge_ngram");
        assert_eq!(analysis["filter"]["autocomplete_filter"]["min_gram"], 2);
        assert_eq!(analysis["filter"]["autocomplete_filter"]["max_gram"], 20);
        assert_eq!(analysis["filter"]["russian_stop"]["stopwords"], "_russian_");
        assert_eq!(analysis["filter"]["russian_stemmer"]["language"], "russian");

        let analyzer = &analysis["analyzer"]["autocomplete"];
        assert_eq!(analyzer["tokenizer"], "standard");
        assert_eq!(
            analyzer["filter"],
            json!(["lowercase", "russian_stop", "russian_stemmer", "autocomplete_filter"])
        );
    }

    #[test]
    fn test_index_settings_follow_language() {
        let settings = get_index_settings("english");
        let filters = &settings["settings"]["analysis"]["filter"];

        assert_eq!(filters["english_stop"]["stopwords"], "_english_");
        assert_eq!(filters["english_stemmer"]["language"], "english");
        assert!(filters["russian_stop"].is_null());
    }

    #[test]
    fn test_index_mappings() {
        let settings = get_index_settings(DEFAULT_ANALYZER_LANGUAGE);
        let properties = &settings["mappings"]["properties"];

        for field in ["name", "description"] {
            assert_eq!(properties[field]["type"], "text");
            assert_eq!(properties[field]["analyzer"], "autocomplete");
            assert_eq!(properties[field]["search_analyzer"], "standard");
        }

        assert_eq!(properties["price"]["type"], "float");
        assert_eq!(properties["quantity"]["type"], "integer");
        assert_eq!(properties["available"]["type"], "boolean");
        assert_eq!(properties["category_id"]["type"], "integer");
        assert_eq!(properties["brand_id"]["type"], "integer");
    }

    #[test]
    fn test_search_body() {
        let body = get_search_body("vivobook", 10);

        assert_eq!(body["size"], 10);
        assert_eq!(body["query"]["multi_match"]["query"], "vivobook");
        assert_eq!(
            body["query"]["multi_match"]["fields"],
            json!(["name", "description"])
        );
        assert_eq!(body["query"]["multi_match"]["fuzziness"], "AUTO");
    }

    #[test]
    fn test_default_config() {
        let config = IndexConfig::default();
        assert_eq!(config.index_name, "products_catalog");
        assert_eq!(config.language, "russian");
        assert_eq!(config.page_size, 10);
    }
}
