use serde_json::{json, Value};

/// Only the best hit is ever returned.
pub const RESULT_SIZE: usize = 1;

/// Fuzzy `match` on the `terms` field, letting the engine size the edit distance.
///
/// The term goes in as a JSON string value, so quotes and query syntax in
/// caller input are never interpreted.
pub fn fuzzy_terms_query(terms: &str) -> Value {
    json!({
        "query": {
            "match": {
                "terms": {
                    "query": terms,
                    "fuzziness": "AUTO"
                }
            }
        },
        "size": RESULT_SIZE
    })
}
