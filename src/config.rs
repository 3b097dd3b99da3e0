use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SEARCH_URL: &str = "http://localhost:9200";
pub const DEFAULT_INDEX_NAME: &str = "brands_index";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub search_url: String,
    pub index_name: String,
    pub request_timeout: Duration,
    pub seed_file: Option<PathBuf>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // no .env is fine
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        let timeout_secs = parse_or(get("SEARCH_TIMEOUT_SECS"), "SEARCH_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);
        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT);

        Self {
            search_url: get("SEARCH_URL").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
            index_name: get("INDEX_NAME").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            seed_file: get("SEED_FILE").map(PathBuf::from),
            port,
        }
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match raw {
        None => default,
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("ignoring invalid {key}={v:?}, using {default}");
            default
        }),
    }
}
