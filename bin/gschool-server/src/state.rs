//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use gschool_classifier::Classifier;

use crate::config::Config;
use crate::entities::SqliteStore;

/// State shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Category, settings and chat persistence.
    pub store: Arc<SqliteStore>,
    /// Page classifier used by `/classify`.
    pub classifier: Arc<dyn Classifier>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
