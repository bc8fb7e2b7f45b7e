//! relgraph
//!
//! Extracts a labeled, directed relationship graph from free-form text by
//! matching a fixed set of surface patterns ("X is connected to Y",
//! "X -> Y", "связь: X -> Y"), and serves it over a small JSON API.
//!
//! # Modules
//!
//! - [`extraction`]: sentence segmentation and pattern matching
//! - [`graph`]: nodes, edges, stats and id assignment
//! - [`api`]: `POST /parse-text` and `GET /health`
//! - [`config`]: layered configuration
//! - [`server`]: listener startup

pub mod api;
pub mod config;
pub mod error;
pub mod extraction;
pub mod graph;
pub mod server;

use std::sync::Arc;

use extraction::{PatternExtractor, RelationshipExtractor};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Extraction strategy used by the parse endpoint.
    pub extractor: Arc<dyn RelationshipExtractor>,
}

impl AppState {
    pub fn new(extractor: Arc<dyn RelationshipExtractor>) -> Self {
        Self { extractor }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(PatternExtractor::default()))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("extractor", &self.extractor.name())
            .finish()
    }
}
