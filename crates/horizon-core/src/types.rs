//! Fundamental data model of an impact scenario.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::JOULES_PER_MEGATON;
use crate::enums::{ExposureSource, InfrastructureCategory, TargetSurface, TsunamiLevel};
use crate::error::HorizonError;

/// Geographic coordinate in degrees (WGS84).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Reject coordinates outside the valid latitude/longitude ranges.
    pub fn validate(&self) -> Result<(), HorizonError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(HorizonError::invalid("lat", "must be within [-90, 90]"));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(HorizonError::invalid("lon", "must be within [-180, 180]"));
        }
        Ok(())
    }
}

/// Physical description of the incoming body and the surface it strikes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactorSpecification {
    /// Diameter in meters.
    pub diameter_m: f64,
    /// Bulk density in kg/m³.
    pub density_kg_m3: f64,
    /// Entry velocity in km/s.
    pub velocity_km_s: f64,
    /// Impact angle from horizontal in degrees (0-90).
    pub angle_deg: f64,
    #[serde(default)]
    pub target_surface: TargetSurface,
}

impl ImpactorSpecification {
    /// Fail fast on physically meaningless parameters. Nothing is clamped.
    pub fn validate(&self) -> Result<(), HorizonError> {
        positive("diameter_m", self.diameter_m)?;
        positive("density_kg_m3", self.density_kg_m3)?;
        positive("velocity_km_s", self.velocity_km_s)?;
        if !self.angle_deg.is_finite() || !(0.0..=90.0).contains(&self.angle_deg) {
            return Err(HorizonError::invalid("angle_deg", "must be within [0, 90]"));
        }
        Ok(())
    }

    /// Mass of a spherical body with this diameter and density (kg).
    pub fn mass_kg(&self) -> f64 {
        let radius = self.diameter_m / 2.0;
        self.density_kg_m3 * (4.0 / 3.0) * std::f64::consts::PI * radius.powi(3)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), HorizonError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HorizonError::invalid(field, "must be a positive number"))
    }
}

/// Impact kinetic energy in joules (full precision).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KineticEnergy(pub f64);

impl KineticEnergy {
    pub fn joules(self) -> f64 {
        self.0
    }

    pub fn megatons(self) -> f64 {
        self.0 / JOULES_PER_MEGATON
    }
}

/// Damage extents in kilometers, rounded to two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageRadii {
    /// Final crater diameter.
    pub crater: f64,
    pub thermal: f64,
    pub air_blast: f64,
    pub seismic: f64,
}

/// Exposure measures feeding the economic model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    /// Sum of per-category weights of affected assets.
    pub infrastructure: f64,
    /// Sum of exposed population counts.
    pub population: f64,
    /// Sum of per-pixel land-value weights.
    pub land_use: f64,
}

impl ComponentScores {
    pub fn is_zero(&self) -> bool {
        self.infrastructure == 0.0 && self.population == 0.0 && self.land_use == 0.0
    }
}

/// A named infrastructure asset inside the air-blast radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedAsset {
    pub name: String,
    #[serde(rename = "type")]
    pub category: InfrastructureCategory,
}

/// A recovered data-source failure recorded during exposure analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub source: ExposureSource,
    pub message: String,
}

/// Weighted exposure result handed to the economic estimator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomicImpact {
    pub total_score: f64,
    pub component_scores: ComponentScores,
    pub affected_infrastructure: Vec<AffectedAsset>,
}

/// Estimated monetary damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "usd", rename_all = "snake_case")]
pub enum MonetaryDamage {
    /// Below the reportable threshold, or nothing exposed.
    Zero,
    Usd(f64),
}

impl MonetaryDamage {
    pub fn usd(&self) -> f64 {
        match self {
            MonetaryDamage::Zero => 0.0,
            MonetaryDamage::Usd(value) => *value,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, MonetaryDamage::Zero)
    }
}

impl fmt::Display for MonetaryDamage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.usd();
        if !value.is_finite() || value <= 0.0 {
            return f.write_str("$0");
        }
        if value < 1e6 {
            write!(f, "${}", group_thousands(value.round() as u64))
        } else if value < 1e9 {
            write!(f, "${:.2} Million", value / 1e6)
        } else if value < 1e12 {
            write!(f, "${:.2} Billion", value / 1e9)
        } else {
            write!(f, "${:.2} Trillion", value / 1e12)
        }
    }
}

/// Insert comma separators: 1234567 -> "1,234,567".
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Tsunami threat of a water impact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsunamiAssessment {
    pub level: TsunamiLevel,
    pub message: String,
}

impl TsunamiAssessment {
    pub fn for_energy(energy: KineticEnergy) -> Self {
        let level = TsunamiLevel::from_megatons(energy.megatons());
        Self {
            level,
            message: level.message().to_string(),
        }
    }
}

/// Full output of one scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub kinetic_energy_joules: f64,
    pub damage_radii: DamageRadii,
    pub total_score: f64,
    pub component_scores: ComponentScores,
    pub affected_infrastructure: Vec<AffectedAsset>,
    pub monetary_damage: MonetaryDamage,
    pub diagnostics: Vec<Diagnostic>,
    /// Present for water targets only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsunami: Option<TsunamiAssessment>,
}
