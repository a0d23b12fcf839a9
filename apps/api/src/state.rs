use std::sync::Arc;

use crate::analysis::AnalysisEngine;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only after startup. Each request clones the `Arc` into a blocking task.
    pub engine: Arc<AnalysisEngine>,
    pub config: Config,
}
