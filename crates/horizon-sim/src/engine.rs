//! Scenario engine: the core of the impact pipeline.
//!
//! `ScenarioEngine` owns the exposure data sources and the economic model,
//! and runs validation → physics → exposure → economics for each scenario.
//! It keeps no per-scenario state, so one engine can serve concurrent
//! requests and identical inputs give identical reports.

use tracing::{debug, info};

use horizon_core::config::{EconomicConfig, HorizonConfig};
use horizon_core::enums::TargetSurface;
use horizon_core::types::{GeoPoint, ImpactorSpecification, ScenarioReport, TsunamiAssessment};
use horizon_core::HorizonError;

use crate::economics;
use crate::exposure::ExposureAnalyzer;
use crate::physics::{self, ImpactOutcome};
use crate::scenario::ScenarioRequest;

/// The scenario engine.
pub struct ScenarioEngine {
    analyzer: ExposureAnalyzer,
    economics: EconomicConfig,
}

impl ScenarioEngine {
    pub fn new(analyzer: ExposureAnalyzer, economics: EconomicConfig) -> Self {
        Self {
            analyzer,
            economics,
        }
    }

    /// Engine wired to the live data sources named in `config`.
    pub fn from_config(config: &HorizonConfig) -> Result<Self, HorizonError> {
        Ok(Self::new(
            ExposureAnalyzer::from_config(config)?,
            config.economics,
        ))
    }

    pub fn economics(&self) -> &EconomicConfig {
        &self.economics
    }

    /// Run one impact scenario end to end.
    ///
    /// Invalid parameters, including impactors whose kinetic energy overflows,
    /// are rejected before the damage model runs. Data-source
    /// failures never fail the run; they show up in `diagnostics`.
    pub fn run_scenario(
        &self,
        impactor: &ImpactorSpecification,
        location: GeoPoint,
    ) -> Result<ScenarioReport, HorizonError> {
        impactor.validate()?;
        location.validate()?;

        let energy = physics::kinetic_energy(impactor);
        if !energy.joules().is_finite() {
            return Err(HorizonError::invalid(
                "impactor",
                "kinetic energy exceeds the representable range",
            ));
        }
        let outcome = ImpactOutcome {
            energy,
            radii: physics::damage_radii(energy, impactor.target_surface),
        };
        debug!(
            energy_joules = outcome.energy.joules(),
            megatons = outcome.energy.megatons(),
            radii = ?outcome.radii,
            "Physics computed"
        );

        let exposure = self.analyzer.analyze(location, &outcome.radii)?;
        let impact = exposure.impact;
        let monetary_damage =
            economics::estimate(&impact.component_scores, outcome.energy, &self.economics);

        info!(
            lat = location.lat,
            lon = location.lon,
            diameter_m = impactor.diameter_m,
            air_blast_km = outcome.radii.air_blast,
            total_score = impact.total_score,
            assets = impact.affected_infrastructure.len(),
            damage = %monetary_damage,
            diagnostics = exposure.diagnostics.len(),
            "Scenario complete"
        );

        let tsunami = (impactor.target_surface == TargetSurface::Water)
            .then(|| TsunamiAssessment::for_energy(outcome.energy));

        Ok(ScenarioReport {
            kinetic_energy_joules: outcome.energy.joules(),
            damage_radii: outcome.radii,
            total_score: impact.total_score,
            component_scores: impact.component_scores,
            affected_infrastructure: impact.affected_infrastructure,
            monetary_damage,
            diagnostics: exposure.diagnostics,
            tsunami,
        })
    }

    /// Resolve a client request and run it.
    pub fn run_request(&self, request: &ScenarioRequest) -> Result<ScenarioReport, HorizonError> {
        let (impactor, location) = request.resolve()?;
        self.run_scenario(&impactor, location)
    }
}
