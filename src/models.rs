use serde::{Deserialize, Serialize};

/// A brand and the aliases it should be found by.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Brand {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Terms")]
    pub terms: String,
}

impl Brand {
    pub fn new(name: impl Into<String>, terms: impl Into<String>) -> Self {
        Self { name: name.into(), terms: terms.into() }
    }
}

// Typed view over the parts of a search response we read.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub hits: HitList,
}

#[derive(Debug, Deserialize)]
pub struct HitList {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
pub struct Hit {
    #[serde(rename = "_source")]
    pub source: Brand,
}
