//! In-process stand-in for the search engine, used by the test suites.
//!
//! Documents live in a map keyed by index name. Searches understand exactly
//! the `match` query the service builds and approximate AUTO fuzziness with
//! a per-token edit distance check. Every call is recorded so tests can
//! assert on what reached the engine.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use super::SearchEngine;
use crate::models::Brand;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    DeleteIndex(String),
    CreateIndex(String),
    Index(String, Brand),
    Search(String, Value),
}

#[derive(Default)]
pub struct MemoryEngine {
    indices: RwLock<HashMap<String, Vec<Brand>>>,
    calls: RwLock<Vec<Call>>,
    fail_deletes: AtomicBool,
    fail_writes: AtomicBool,
    fail_searches: AtomicBool,
    garble_searches: AtomicBool,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_deletes(&self, on: bool) {
        self.fail_deletes.store(on, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    pub fn fail_searches(&self, on: bool) {
        self.fail_searches.store(on, Ordering::SeqCst);
    }

    /// Makes searches answer with a body that is not a search response.
    pub fn garble_searches(&self, on: bool) {
        self.garble_searches.store(on, Ordering::SeqCst);
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.read().await.clone()
    }

    pub async fn search_bodies(&self) -> Vec<Value> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|c| match c {
                Call::Search(_, body) => Some(body.clone()),
                _ => None,
            })
            .collect()
    }

    pub async fn index_calls(&self) -> usize {
        self.calls.read().await.iter().filter(|c| matches!(c, Call::Index(..))).count()
    }

    pub async fn documents(&self, index: &str) -> Option<Vec<Brand>> {
        self.indices.read().await.get(index).cloned()
    }

    /// Seeds an index directly, bypassing call recording.
    pub async fn preload(&self, index: &str, docs: Vec<Brand>) {
        self.indices.write().await.insert(index.to_string(), docs);
    }

    async fn record(&self, call: Call) {
        self.calls.write().await.push(call);
    }
}

#[async_trait]
impl SearchEngine for MemoryEngine {
    async fn delete_index(&self, index: &str) -> Result<()> {
        self.record(Call::DeleteIndex(index.to_string())).await;
        if self.fail_deletes.load(Ordering::SeqCst) {
            bail!("security_exception: no permissions for [indices:admin/delete]");
        }
        self.indices.write().await.remove(index);
        Ok(())
    }

    async fn create_index(&self, index: &str) -> Result<()> {
        self.record(Call::CreateIndex(index.to_string())).await;
        let mut indices = self.indices.write().await;
        if indices.contains_key(index) {
            bail!("resource_already_exists_exception: index [{index}] already exists");
        }
        indices.insert(index.to_string(), Vec::new());
        Ok(())
    }

    async fn index_document(&self, index: &str, brand: &Brand) -> Result<()> {
        self.record(Call::Index(index.to_string(), brand.clone())).await;
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("cluster_block_exception: index [{index}] blocked");
        }
        // the real engine auto-creates missing indices on write
        self.indices
            .write()
            .await
            .entry(index.to_string())
            .or_default()
            .push(brand.clone());
        Ok(())
    }

    async fn search(&self, index: &str, body: &Value) -> Result<Value> {
        self.record(Call::Search(index.to_string(), body.clone())).await;
        if self.fail_searches.load(Ordering::SeqCst) {
            bail!("connection refused");
        }
        if self.garble_searches.load(Ordering::SeqCst) {
            return Ok(json!({ "acknowledged": true }));
        }

        let term = body["query"]["match"]["terms"]["query"]
            .as_str()
            .ok_or_else(|| anyhow!("parsing_exception: unsupported query"))?;
        let fuzzy = body["query"]["match"]["terms"]["fuzziness"] == "AUTO";
        let size = body["size"].as_u64().unwrap_or(10) as usize;

        let indices = self.indices.read().await;
        let docs = indices
            .get(index)
            .ok_or_else(|| anyhow!("index_not_found_exception: no such index [{index}]"))?;

        let mut scored: Vec<(usize, &Brand)> = docs
            .iter()
            .map(|doc| (score(term, &doc.terms, fuzzy), doc))
            .filter(|(s, _)| *s > 0)
            .collect();
        // stable, so ties keep insertion order
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let hits: Vec<Value> = scored
            .into_iter()
            .take(size)
            .map(|(s, doc)| json!({ "_index": index, "_score": s, "_source": doc }))
            .collect();

        Ok(json!({ "hits": { "total": { "value": hits.len() }, "hits": hits } }))
    }
}

fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn score(query: &str, field: &str, fuzzy: bool) -> usize {
    let field_tokens = tokens(field);
    tokens(query)
        .iter()
        .filter(|q| {
            let allowed = if fuzzy { auto_fuzziness(q) } else { 0 };
            field_tokens.iter().any(|f| edit_distance(q, f) <= allowed)
        })
        .count()
}

fn auto_fuzziness(token: &str) -> usize {
    match token.chars().count() {
        0..=2 => 0,
        3..=5 => 1,
        _ => 2,
    }
}

fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.iter().enumerate() {
        let mut cur = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let sub = prev[j] + usize::from(ca != cb);
            cur[j + 1] = sub.min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        prev = cur;
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_distance_basics() {
        assert_eq!(edit_distance("iphone", "iphone"), 0);
        assert_eq!(edit_distance("iphon", "iphone"), 1);
        assert_eq!(edit_distance("galxy", "galaxy"), 1);
        assert_eq!(edit_distance("", "abc"), 3);
    }

    #[test]
    fn auto_fuzziness_scales_with_length() {
        assert_eq!(auto_fuzziness("s2"), 0);
        assert_eq!(auto_fuzziness("ipod"), 1);
        assert_eq!(auto_fuzziness("macbook"), 2);
    }

    #[rocket::async_test]
    async fn delete_of_missing_index_is_ok_but_double_create_fails() {
        let engine = MemoryEngine::new();

        assert!(engine.delete_index("nope").await.is_ok());
        assert!(engine.create_index("brands").await.is_ok());
        assert!(engine.create_index("brands").await.is_err());
    }

    #[rocket::async_test]
    async fn search_tolerates_typos() {
        let engine = MemoryEngine::new();
        engine
            .preload("b", vec![Brand::new("Samsung", "Samsung, Galaxy, S21, S20")])
            .await;

        let body = crate::search::query::fuzzy_terms_query("Galxy");
        let raw = engine.search("b", &body).await.unwrap();

        assert_eq!(raw["hits"]["hits"][0]["_source"]["name"], "Samsung");
    }
}
