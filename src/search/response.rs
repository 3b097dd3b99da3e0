use anyhow::{Context, Result};
use serde_json::Value;

use crate::models::{Brand, SearchResponse};

/// Pulls the highest ranked brand out of a raw search response.
/// `Ok(None)` means the engine found nothing.
pub fn top_hit(raw: Value) -> Result<Option<Brand>> {
    let res: SearchResponse =
        serde_json::from_value(raw).context("unexpected search response shape")?;

    Ok(res.hits.hits.into_iter().next().map(|hit| hit.source))
}
