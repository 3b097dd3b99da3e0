use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::models::Brand;

pub mod opensearch_engine;
pub mod query;
pub mod response;

#[cfg(test)]
pub mod memory_engine;

pub use opensearch_engine::OpenSearchEngine;

/// Operations the service needs from the external search engine.
///
/// Implementations are shared across concurrent requests.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Drops `index`. An index that does not exist is not an error.
    async fn delete_index(&self, index: &str) -> Result<()>;
    async fn create_index(&self, index: &str) -> Result<()>;
    async fn index_document(&self, index: &str, brand: &Brand) -> Result<()>;
    /// Runs a prebuilt query body and hands back the raw response.
    async fn search(&self, index: &str, body: &Value) -> Result<Value>;
}
