#[macro_use] extern crate rocket;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use rocket::{Build, Rocket};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod models;
mod search;
mod seed;
mod state;
mod routes {
    pub mod brands;
    pub mod search;
}


use config::AppConfig;
use search::OpenSearchEngine;
use state::AppState;

#[get("/health")]
fn health() -> &'static str {
    "ok"
}

/// Mounts every route over the given state. Config comes from the caller's figment.
pub fn build(state: AppState, figment: rocket::figment::Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .manage(state)
        .mount("/", routes![health])
        .mount("/", routes::search::routes())
        .mount("/", routes::brands::routes())
}

#[rocket::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = AppConfig::from_env();

    // 1) engine must answer before anything else happens
    let engine = OpenSearchEngine::connect(&cfg).await?;

    // 2) fresh index with the bootstrap records, before we accept traffic
    let brands = seed::load_brands(cfg.seed_file.as_deref())?;
    seed::reset_and_seed(&engine, &cfg.index_name, &brands)
        .await
        .context("seeding search index")?;

    // 3) serve
    let state = AppState::new(Arc::new(engine), cfg.index_name.clone());
    let figment = rocket::Config::figment().merge(("port", cfg.port));
    tracing::info!("server starting on port {}", cfg.port);

    if let Err(err) = build(state, figment).launch().await {
        let kind = err.pretty_print();
        return Err(anyhow!("server failed to launch: {kind}"));
    }

    Ok(())
}
