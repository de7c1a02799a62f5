//! Application state shared across request handlers.

use std::sync::Arc;
use std::time::Duration;

use horizon_sim::ScenarioEngine;

/// Shared handler state.
///
/// The engine holds no per-scenario state, so concurrent requests share one
/// instance without locking.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ScenarioEngine>,
    /// Upper bound on one full pipeline run.
    pub timeout: Duration,
}

impl AppState {
    pub fn new(engine: ScenarioEngine, timeout: Duration) -> Self {
        Self {
            engine: Arc::new(engine),
            timeout,
        }
    }
}
