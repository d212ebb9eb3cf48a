//! HTTP-level tests for the OpenSearch provider.
//!
//! These tests point the real `OpenSearchProvider` at a `wiremock` server and
//! check the requests it sends and how it interprets the engine's answers.
//!
//! Run with: `cargo test --test opensearch_provider`

use std::sync::Arc;

use catalog_search_repository::{
    IndexConfig, OpenSearchProvider, SearchIndexError, SearchIndexProvider, SearchIndexService,
};
use catalog_search_shared::{ProductDocument, ProductSearchQuery};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX: &str = "products_catalog";

async fn provider_for(server: &MockServer) -> OpenSearchProvider {
    OpenSearchProvider::open(&server.uri(), IndexConfig::default())
        .await
        .unwrap()
}

fn vivobook() -> ProductDocument {
    ProductDocument::new(
        1,
        "ASUS VivoBook 15",
        Some("Universal laptop with an Intel Core i5".to_string()),
        54000.0,
        1,
        1,
    )
    .with_stock(10, true)
}

fn hit(source: serde_json::Value) -> serde_json::Value {
    json!({
        "_index": INDEX,
        "_id": source["id"].to_string(),
        "_score": 1.0,
        "_source": source
    })
}

fn search_response(hits: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "took": 1,
        "timed_out": false,
        "hits": {
            "total": { "value": hits.len(), "relation": "eq" },
            "hits": hits
        }
    })
}

// ============================================================================
// Index provisioning
// ============================================================================

#[tokio::test]
async fn test_ensure_index_creates_index_with_analyzer() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path(format!("/{}", INDEX)))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("/{}", INDEX)))
        .and(body_partial_json(json!({
            "settings": {
                "analysis": {
                    "filter": {
                        "autocomplete_filter": { "type": "edge_ngram", "min_gram": 2, "max_gram": 20 }
                    }
                }
            },
            "mappings": {
                "properties": {
                    "name": { "type": "text", "analyzer": "autocomplete" }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "acknowledged": true,
            "shards_acknowledged": true,
            "index": INDEX
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = SearchIndexService::new(Arc::new(provider_for(&server).await));

    service.ensure_index().await.unwrap();
}

#[tokio::test]
async fn test_ensure_index_twice_creates_once() {
    let server = MockServer::start().await;

    // First check misses, every later check finds the index.
    Mock::given(method("HEAD"))
        .and(path(format!("/{}", INDEX)))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("HEAD"))
        .and(path(format!("/{}", INDEX)))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("/{}", INDEX)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "acknowledged": true })))
        .expect(1)
        .mount(&server)
        .await;

    let service = SearchIndexService::new(Arc::new(provider_for(&server).await));

    service.ensure_index().await.unwrap();
    service.ensure_index().await.unwrap();
}

#[tokio::test]
async fn test_create_index_accepts_concurrent_creation() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/{}", INDEX)))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "type": "resource_already_exists_exception",
                "reason": "index [products_catalog/abc] already exists"
            },
            "status": 400
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;

    assert!(provider.create_index().await.is_ok());
}

#[tokio::test]
async fn test_create_index_propagates_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path(format!("/{}", INDEX)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("/{}", INDEX)))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "type": "illegal_argument_exception",
                "reason": "failed to find filter under name [russian_stemmer]"
            },
            "status": 400
        })))
        .mount(&server)
        .await;

    let service = SearchIndexService::new(Arc::new(provider_for(&server).await));

    let result = service.ensure_index().await;

    assert!(matches!(
        result,
        Err(SearchIndexError::IndexCreationError(_))
    ));
}

// ============================================================================
// Indexing
// ============================================================================

#[tokio::test]
async fn test_upsert_writes_document_under_product_id() {
    let server = MockServer::start().await;

    Mock::given(path(format!("/{}/_doc/1", INDEX)))
        .and(body_partial_json(json!({
            "id": 1,
            "name": "ASUS VivoBook 15",
            "quantity": 10,
            "available": true,
            "category_id": 1,
            "brand_id": 1
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_index": INDEX,
            "_id": "1",
            "result": "created"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = SearchIndexService::new(Arc::new(provider_for(&server).await));

    service.upsert(&vivobook()).await.unwrap();
}

#[tokio::test]
async fn test_upsert_propagates_engine_rejection() {
    let server = MockServer::start().await;

    Mock::given(path(format!("/{}/_doc/1", INDEX)))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "type": "mapper_parsing_exception" },
            "status": 400
        })))
        .mount(&server)
        .await;

    let service = SearchIndexService::new(Arc::new(provider_for(&server).await));

    let result = service.upsert(&vivobook()).await;

    assert!(matches!(result, Err(SearchIndexError::IndexError(_))));
}

#[tokio::test]
async fn test_remove_missing_document_is_ok() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/{}/_doc/999", INDEX)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "_index": INDEX,
            "_id": "999",
            "result": "not_found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = SearchIndexService::new(Arc::new(provider_for(&server).await));

    assert!(service.remove(999).await.is_ok());
}

#[tokio::test]
async fn test_remove_propagates_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/{}/_doc/1", INDEX)))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let service = SearchIndexService::new(Arc::new(provider_for(&server).await));

    let result = service.remove(1).await;

    assert!(matches!(result, Err(SearchIndexError::DeleteError(_))));
}

// ============================================================================
// Searching
// ============================================================================

#[tokio::test]
async fn test_search_sends_fuzzy_multi_match() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}/_search", INDEX)))
        .and(body_partial_json(json!({
            "size": 10,
            "query": {
                "multi_match": {
                    "query": "vivobook",
                    "fields": ["name", "description"],
                    "fuzziness": "AUTO"
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(vec![hit(
            serde_json::to_value(vivobook()).unwrap(),
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let service = SearchIndexService::new(Arc::new(provider_for(&server).await));

    let results = service.search(&ProductSearchQuery::new("vivobook")).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0], vivobook());
}

#[tokio::test]
async fn test_search_post_filters_by_category() {
    let server = MockServer::start().await;

    let laptop = json!({
        "id": 1, "name": "ASUS VivoBook 15", "price": 54000.0,
        "quantity": 10, "available": true, "category_id": 1, "brand_id": 1
    });
    let monitor = json!({
        "id": 61, "name": "ASUS VG249Q", "price": 21000.0,
        "quantity": 4, "available": true, "category_id": 2, "brand_id": 1
    });

    Mock::given(method("POST"))
        .and(path(format!("/{}/_search", INDEX)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_response(vec![hit(monitor), hit(laptop)])),
        )
        .mount(&server)
        .await;

    let service = SearchIndexService::new(Arc::new(provider_for(&server).await));

    let results = service
        .search(&ProductSearchQuery::new("asus").with_category(1))
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, 1);
    assert!(results.iter().all(|d| d.category_id == 1));
}

#[tokio::test]
async fn test_search_engine_error_yields_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}/_search", INDEX)))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let service = SearchIndexService::new(Arc::new(provider_for(&server).await));

    let query = ProductSearchQuery::new("anything");
    assert!(service.search(&query).await.is_empty());
    assert!(matches!(
        service.try_search(&query).await,
        Err(SearchIndexError::SearchError(_))
    ));
}

#[tokio::test]
async fn test_search_malformed_response_yields_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}/_search", INDEX)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let service = SearchIndexService::new(Arc::new(provider_for(&server).await));

    let result = service
        .try_search(&ProductSearchQuery::new("anything"))
        .await;

    assert!(matches!(result, Err(SearchIndexError::ParseError(_))));
}

// ============================================================================
// Unreachable engine
// ============================================================================

/// Opens a provider against a port nothing listens on.
async fn unreachable_service() -> SearchIndexService {
    let provider = OpenSearchProvider::open("http://127.0.0.1:1", IndexConfig::default())
        .await
        .unwrap();
    SearchIndexService::new(Arc::new(provider))
}

#[tokio::test]
async fn test_search_with_unreachable_engine_yields_empty() {
    let service = unreachable_service().await;

    let results = service.search(&ProductSearchQuery::new("anything")).await;

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_try_search_with_unreachable_engine_reports_connection_error() {
    let service = unreachable_service().await;

    let result = service
        .try_search(&ProductSearchQuery::new("anything"))
        .await;

    assert!(matches!(result, Err(SearchIndexError::ConnectionError(_))));
}

#[tokio::test]
async fn test_ensure_index_with_unreachable_engine_is_ok() {
    let service = unreachable_service().await;

    assert!(service.ensure_index().await.is_ok());
}

#[tokio::test]
async fn test_upsert_with_unreachable_engine_propagates() {
    let service = unreachable_service().await;

    let result = service.upsert(&vivobook()).await;

    assert!(matches!(result, Err(SearchIndexError::ConnectionError(_))));
}
