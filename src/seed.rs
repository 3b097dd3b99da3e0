use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Brand;
use crate::search::SearchEngine;

/// Records every fresh index starts with, in insertion order.
pub fn bootstrap_brands() -> Vec<Brand> {
    vec![
        Brand::new("Apple", "Apple, IPOD, Iphone, Macbook"),
        Brand::new("Samsung", "Samsung, Galaxy, S21, S20"),
    ]
}

/// Seed records from `path` (a JSON array of brands), or the built-in set.
pub fn load_brands(path: Option<&Path>) -> Result<Vec<Brand>> {
    let Some(path) = path else {
        return Ok(bootstrap_brands());
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading seed file {}", path.display()))?;
    let brands: Vec<Brand> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing seed file {}", path.display()))?;

    Ok(brands)
}

/// Wipes `index` and fills it with `brands`. Any failure aborts the whole run.
pub async fn reset_and_seed(engine: &dyn SearchEngine, index: &str, brands: &[Brand]) -> Result<usize> {
    engine.delete_index(index).await?;
    engine.create_index(index).await?;
    tracing::info!("index {index} recreated");

    for brand in brands {
        engine
            .index_document(index, brand)
            .await
            .with_context(|| format!("seeding {:?}", brand.name))?;
    }

    tracing::info!("seeded {} documents into {index}", brands.len());
    Ok(brands.len())
}
