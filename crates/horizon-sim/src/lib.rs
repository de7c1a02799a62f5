//! Impact scenario pipeline for ImpactHorizon.
//!
//! Physics → exposure → economics, composed in a fixed order by
//! [`ScenarioEngine`]. Every stage is recomputed from scratch per scenario;
//! nothing is retained between runs.

pub mod economics;
pub mod engine;
pub mod exposure;
pub mod physics;
pub mod scenario;

pub use horizon_core as core;
pub use engine::ScenarioEngine;
pub use scenario::ScenarioRequest;
