//! ImpactHorizon HTTP service.
//!
//! This crate wires the scenario engine to a JSON-over-HTTP API. Each
//! request runs the blocking pipeline on tokio's blocking pool under a
//! request-level timeout.

pub mod error;
pub mod payload;
pub mod routes;
pub mod state;

pub use horizon_core as core;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyse", post(routes::analyse))
        .route("/asteroids", get(routes::asteroids))
        .route("/health", get(routes::health))
        .with_state(state)
}
