use std::sync::Arc;

use tokio::sync::Mutex;

use crate::pipeline::EligibilityPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<EligibilityPipeline>,
    /// Held for a whole pipeline run so submissions are evaluated one at a time.
    pub submission_gate: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(pipeline: EligibilityPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            submission_gate: Arc::new(Mutex::new(())),
        }
    }
}
