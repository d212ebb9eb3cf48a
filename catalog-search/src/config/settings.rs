//! Environment-driven settings.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use catalog_search_repository::config::DEFAULT_MAX_BATCH_SIZE;
use catalog_search_repository::opensearch::{DEFAULT_ANALYZER_LANGUAGE, DEFAULT_PAGE_SIZE, INDEX_NAME};
use catalog_search_repository::{IndexConfig, SearchIndexServiceConfig};

use crate::sync::SyncConfig;

/// Default search engine URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Settings for the catalog search, read from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Search engine base URL.
    pub opensearch_url: String,
    pub index_name: String,
    /// Analyzer language used for stop words and stemming.
    pub language: String,
    /// Number of hits requested per search.
    pub page_size: usize,
    /// Largest accepted bulk upsert, also the re-index chunk size.
    pub max_batch_size: usize,
    /// JSON catalog snapshot used to re-index on provisioning.
    pub catalog_snapshot_path: Option<PathBuf>,
    pub startup_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            opensearch_url: DEFAULT_OPENSEARCH_URL.to_string(),
            index_name: INDEX_NAME.to_string(),
            language: DEFAULT_ANALYZER_LANGUAGE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            catalog_snapshot_path: None,
            startup_delay: Duration::ZERO,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: engine URL (default: http://localhost:9200, `ELASTICSEARCH_URL` also accepted)
    /// - `SEARCH_INDEX_NAME`: index name (default: products_catalog)
    /// - `SEARCH_ANALYZER_LANGUAGE`: analyzer language (default: russian)
    /// - `SEARCH_PAGE_SIZE`: hits per search (default: 10)
    /// - `SEARCH_MAX_BATCH_SIZE`: largest bulk upsert (default: 1000)
    /// - `CATALOG_SNAPSHOT_PATH`: catalog snapshot to re-index from (default: none)
    /// - `SEARCH_STARTUP_DELAY_SECS`: wait before provisioning (default: 0)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    ///
    /// Blank values count as unset; unparsable numbers fall back to the default
    /// with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let opensearch_url = var("OPENSEARCH_URL")
            .or_else(|| var("ELASTICSEARCH_URL"))
            .unwrap_or(defaults.opensearch_url);

        Self {
            opensearch_url,
            index_name: var("SEARCH_INDEX_NAME").unwrap_or(defaults.index_name),
            language: var("SEARCH_ANALYZER_LANGUAGE")
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.language),
            page_size: parse_positive(&var, "SEARCH_PAGE_SIZE", defaults.page_size),
            max_batch_size: parse_positive(&var, "SEARCH_MAX_BATCH_SIZE", defaults.max_batch_size),
            catalog_snapshot_path: var("CATALOG_SNAPSHOT_PATH").map(PathBuf::from),
            startup_delay: Duration::from_secs(parse_or(
                &var,
                "SEARCH_STARTUP_DELAY_SECS",
                defaults.startup_delay.as_secs(),
            )),
        }
    }

    pub fn index_config(&self) -> IndexConfig {
        IndexConfig::new(self.index_name.clone(), self.language.clone(), self.page_size)
    }

    pub fn service_config(&self) -> SearchIndexServiceConfig {
        SearchIndexServiceConfig::with_max_batch_size(self.max_batch_size)
    }

    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            batch_size: self.max_batch_size,
            startup_delay: self.startup_delay,
        }
    }
}

fn parse_or<T, V>(var: &V, key: &str, default: T) -> T
where
    T: FromStr,
    V: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key = key, value = %raw, "Invalid setting, using default");
            default
        }),
        None => default,
    }
}

fn parse_positive<V>(var: &V, key: &str, default: usize) -> usize
where
    V: Fn(&str) -> Option<String>,
{
    match parse_or(var, key, default) {
        0 => {
            warn!(key = key, "Setting must be positive, using default");
            default
        }
        value => value,
    }
}
