//! Request handlers.

use axum::extract::State;
use axum::Json;
use tracing::{info, warn};

use horizon_core::catalog::{CatalogEntry, CATALOG};
use horizon_sim::ScenarioRequest;

use crate::error::ApiError;
use crate::payload::{AnalyseResponse, Health};
use crate::state::AppState;

/// Run one impact scenario.
///
/// `POST /analyse` with a [`ScenarioRequest`] body.
pub async fn analyse(
    State(state): State<AppState>,
    Json(request): Json<ScenarioRequest>,
) -> Result<Json<AnalyseResponse>, ApiError> {
    info!(
        lat = request.target.lat,
        lon = request.target.lon,
        asteroid_id = request.asteroid_id.as_deref(),
        diameter = request.diameter,
        "Analysing scenario"
    );

    let engine = state.engine.clone();
    let task = tokio::task::spawn_blocking(move || engine.run_request(&request));

    // A timed-out run finishes in the background; its result is dropped.
    let report = match tokio::time::timeout(state.timeout, task).await {
        Ok(Ok(result)) => result?,
        Ok(Err(join_error)) => return Err(ApiError::Worker(join_error.to_string())),
        Err(_) => {
            warn!(timeout_secs = state.timeout.as_secs(), "Scenario timed out");
            return Err(ApiError::Timeout(state.timeout));
        }
    };

    Ok(Json(AnalyseResponse::from(report)))
}

/// `GET /asteroids`: the catalog as a bare JSON array.
pub async fn asteroids() -> Json<Vec<CatalogEntry>> {
    Json(CATALOG.to_vec())
}

/// `GET /health`
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
