use std::sync::Arc;

use crate::search::SearchEngine;

/// Shared by every request; the engine handle is the only thing in here that talks to the network.
pub struct AppState {
    pub engine: Arc<dyn SearchEngine>,
    pub index: String,
}

impl AppState {
    pub fn new(engine: Arc<dyn SearchEngine>, index: impl Into<String>) -> Self {
        Self { engine, index: index.into() }
    }
}
