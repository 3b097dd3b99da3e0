use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use opensearch::http::response::Response;
use opensearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use opensearch::http::{StatusCode, Url};
use opensearch::indices::{IndicesCreateParts, IndicesDeleteParts};
use opensearch::params::Refresh;
use opensearch::{IndexParts, OpenSearch, SearchParts};
use serde_json::{json, Value};

use super::SearchEngine;
use crate::config::AppConfig;
use crate::models::Brand;

pub struct OpenSearchEngine {
    client: OpenSearch,
}

impl OpenSearchEngine {
    /// Builds the client and checks the cluster answers before anything else runs.
    pub async fn connect(cfg: &AppConfig) -> Result<Self> {
        let engine = Self::new(&cfg.search_url, cfg.request_timeout)?;

        let info: Value = engine
            .client
            .info()
            .send()
            .await
            .and_then(Response::error_for_status_code)
            .with_context(|| format!("search engine unreachable at {}", cfg.search_url))?
            .json()
            .await?;

        tracing::info!(
            cluster = %info["cluster_name"].as_str().unwrap_or("?"),
            version = %info["version"]["number"].as_str().unwrap_or("?"),
            "connected to search engine"
        );

        Ok(engine)
    }

    /// Client for a single node, no requests made yet.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("invalid SEARCH_URL {url:?}"))?;
        let transport = TransportBuilder::new(SingleNodeConnectionPool::new(url))
            .timeout(timeout)
            .build()?;

        Ok(Self { client: OpenSearch::new(transport) })
    }
}

#[async_trait]
impl SearchEngine for OpenSearchEngine {
    async fn delete_index(&self, index: &str) -> Result<()> {
        let res = self.client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .with_context(|| format!("deleting index {index}"))?;

        if res.status_code() == StatusCode::NOT_FOUND {
            tracing::debug!("index {index} did not exist");
            return Ok(());
        }

        res.error_for_status_code()
            .with_context(|| format!("deleting index {index}"))?;
        Ok(())
    }

    async fn create_index(&self, index: &str) -> Result<()> {
        self.client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(json!({
                "mappings": {
                    "properties": {
                        "name": { "type": "text" },
                        "terms": { "type": "text" }
                    }
                }
            }))
            .send()
            .await
            .and_then(Response::error_for_status_code)
            .with_context(|| format!("creating index {index}"))?;

        Ok(())
    }

    async fn index_document(&self, index: &str, brand: &Brand) -> Result<()> {
        // wait_for so the next search sees the new document
        self.client
            .index(IndexParts::Index(index))
            .body(brand)
            .refresh(Refresh::WaitFor)
            .send()
            .await
            .and_then(Response::error_for_status_code)
            .with_context(|| format!("indexing {:?} into {index}", brand.name))?;

        Ok(())
    }

    async fn search(&self, index: &str, body: &Value) -> Result<Value> {
        let res = self.client
            .search(SearchParts::Index(&[index]))
            .body(body)
            .send()
            .await
            .and_then(Response::error_for_status_code)
            .with_context(|| format!("searching {index}"))?;

        let raw = res.json::<Value>().await.context("reading search response")?;
        Ok(raw)
    }
}
