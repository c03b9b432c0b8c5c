//! Shared application state for all routes. Rules are immutable after startup.

use crate::config::ResolvedRules;
use crate::service::Backend;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub rules: Arc<ResolvedRules>,
    pub backend: Arc<dyn Backend>,
    /// REST root the translator builds URLs against.
    pub backend_url: Arc<str>,
}

impl AppState {
    pub fn new(rules: ResolvedRules, backend: Arc<dyn Backend>, backend_url: &str) -> Self {
        AppState {
            rules: Arc::new(rules),
            backend,
            backend_url: Arc::from(backend_url.trim_end_matches('/')),
        }
    }
}
