use std::sync::Arc;

use crate::config::Config;
use crate::export::ExportPipeline;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    /// Export backends are swappable; tests inject failing ones.
    pub exporter: Arc<ExportPipeline>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            sessions: SessionStore::new(config.history_limit),
            exporter: Arc::new(ExportPipeline::new(config.export)),
            config,
        }
    }
}
