//! Response bodies.

use serde::Serialize;

use horizon_core::types::{
    AffectedAsset, ComponentScores, DamageRadii, Diagnostic, ScenarioReport, TsunamiAssessment,
};

/// Body of a successful `POST /analyse`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyseResponse {
    pub damage_radii_km: DamageRadii,
    pub kinetic_energy_joules: f64,
    pub impact_summary: ImpactSummary,
    pub component_scores: ComponentScores,
    pub affected_infrastructure: Vec<AffectedAsset>,
    pub diagnostics: Vec<Diagnostic>,
    /// Water targets only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsunami: Option<TsunamiAssessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactSummary {
    pub total_economic_score: f64,
    /// Human-scale currency string ("$0", "$1.25 Billion", ...).
    pub estimated_monetary_damage_usd: String,
}

impl From<ScenarioReport> for AnalyseResponse {
    fn from(report: ScenarioReport) -> Self {
        Self {
            damage_radii_km: report.damage_radii,
            kinetic_energy_joules: report.kinetic_energy_joules,
            impact_summary: ImpactSummary {
                total_economic_score: report.total_score,
                estimated_monetary_damage_usd: report.monetary_damage.to_string(),
            },
            component_scores: report.component_scores,
            affected_infrastructure: report.affected_infrastructure,
            diagnostics: report.diagnostics,
            tsunami: report.tsunami,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}
