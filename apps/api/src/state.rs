use std::sync::Arc;

use crate::agent::ScreenplayAgent;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Lazily initializes its generation backend on the first screenplay request.
    pub agent: Arc<ScreenplayAgent>,
}
