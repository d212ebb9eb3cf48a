//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate. The same REST calls are understood by
//! Elasticsearch, so the provider works against either engine.

use async_trait::async_trait;
use opensearch::{
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    DeleteParts, IndexParts, OpenSearch, SearchParts,
};
use serde::Deserialize;
use tracing::{debug, error, info};
use url::Url;

use catalog_search_shared::{ProductDocument, ProductId};

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::{get_index_settings, get_search_body, IndexConfig};

/// Error type returned by the engine when the index was created concurrently.
const RESOURCE_ALREADY_EXISTS: &str = "resource_already_exists_exception";

/// Subset of the engine's search response that carries the hits.
#[derive(Debug, Deserialize)]
struct SearchResponseBody {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: ProductDocument,
}

/// OpenSearch provider implementation.
///
/// Holds the single long-lived client for the product index. The client issues
/// one independent HTTP request per call and is shared freely across tasks.
///
/// # Example
///
/// ```ignore
/// use catalog_search_repository::opensearch::{IndexConfig, OpenSearchProvider};
///
/// let provider = OpenSearchProvider::open("http://localhost:9200", IndexConfig::default()).await?;
/// provider.index_document(&document).await?;
/// provider.close().await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchProvider {
    /// Open a provider connected to the specified URL.
    ///
    /// No request is sent here; an unreachable engine surfaces on the first call.
    ///
    /// # Arguments
    ///
    /// * `url` - The engine URL (e.g., "http://localhost:9200")
    /// * `index_config` - The index name, analyzer language and page size
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or the transport cannot be built
    pub async fn open(url: &str, index_config: IndexConfig) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            index = %index_config.index_name,
            language = %index_config.language,
            page_size = index_config.page_size,
            "Opened OpenSearch provider"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    /// The index configuration this provider was opened with.
    pub fn index_config(&self) -> &IndexConfig {
        &self.index_config
    }

    fn index_name(&self) -> &str {
        &self.index_config.index_name
    }

    /// Read the body of a failed response for error reporting.
    async fn error_body(response: Response) -> String {
        response.text().await.unwrap_or_default()
    }
}

/// Map a failure to send a request at all onto a connection error.
fn transport_error(e: opensearch::Error) -> SearchIndexError {
    SearchIndexError::connection(e.to_string())
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    async fn index_exists(&self) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[self.index_name()]))
            .send()
            .await
            .map_err(transport_error)?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(SearchIndexError::index_creation(format!(
                "Index existence check returned status {}",
                status
            ))),
        }
    }

    async fn create_index(&self) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(self.index_name()))
            .body(get_index_settings(&self.index_config.language))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status_code();
        if status.is_success() {
            info!(index = %self.index_name(), "Created search index");
            return Ok(());
        }

        let error_body = Self::error_body(response).await;
        if error_body.contains(RESOURCE_ALREADY_EXISTS) {
            debug!(index = %self.index_name(), "Search index was created concurrently");
            return Ok(());
        }

        error!(status = %status, body = %error_body, "Index creation request failed");
        Err(SearchIndexError::index_creation(format!(
            "Index creation failed with status {}: {}",
            status, error_body
        )))
    }

    async fn index_document(&self, document: &ProductDocument) -> Result<(), SearchIndexError> {
        let doc_id = document.document_id();

        let response = self
            .client
            .index(IndexParts::IndexId(self.index_name(), &doc_id))
            .body(document)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(SearchIndexError::index(format!(
                "Indexing product {} failed with status {}: {}",
                doc_id, status, error_body
            )));
        }

        debug!(doc_id = %doc_id, "Document indexed");
        Ok(())
    }

    async fn delete_document(&self, product_id: ProductId) -> Result<(), SearchIndexError> {
        let doc_id = product_id.to_string();

        let response = self
            .client
            .delete(DeleteParts::IndexId(self.index_name(), &doc_id))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status_code();

        // 404 is acceptable - document may not exist
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Delete request failed");
            return Err(SearchIndexError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %doc_id, status = %status, "Document deleted");
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<ProductDocument>, SearchIndexError> {
        let index_name = self.index_name();

        let response = self
            .client
            .search(SearchParts::Index(&[index_name]))
            .body(get_search_body(query, self.index_config.page_size))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchIndexError::search(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let body: SearchResponseBody = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        let documents: Vec<ProductDocument> =
            body.hits.hits.into_iter().map(|hit| hit.source).collect();

        debug!(query = %query, hits = documents.len(), "Search completed");
        Ok(documents)
    }

    async fn close(&self) -> Result<(), SearchIndexError> {
        info!(index = %self.index_name(), "Closed OpenSearch provider");
        Ok(())
    }
}
