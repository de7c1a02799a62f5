//! Enumeration types used throughout the pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Surface class at the impact point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSurface {
    #[default]
    SedimentaryRock,
    CrystallineRock,
    /// Ocean or lake. No crater forms in a fluid target.
    Water,
}

impl TargetSurface {
    /// Transient crater scaling coefficient for this surface.
    pub fn crater_coefficient(self) -> f64 {
        use crate::constants::{CRATER_K_CRYSTALLINE, CRATER_K_SEDIMENTARY};

        match self {
            TargetSurface::SedimentaryRock => CRATER_K_SEDIMENTARY,
            TargetSurface::CrystallineRock | TargetSurface::Water => CRATER_K_CRYSTALLINE,
        }
    }
}

/// Critical infrastructure category.
///
/// Declaration order is the matching priority: a feature that carries tags for
/// several categories is counted once, as the first category that matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InfrastructureCategory {
    Hospital,
    Airport,
    Port,
    Power,
    Station,
    University,
    School,
}

impl InfrastructureCategory {
    /// All categories in matching priority order.
    pub const ALL: [InfrastructureCategory; 7] = [
        InfrastructureCategory::Hospital,
        InfrastructureCategory::Airport,
        InfrastructureCategory::Port,
        InfrastructureCategory::Power,
        InfrastructureCategory::Station,
        InfrastructureCategory::University,
        InfrastructureCategory::School,
    ];

    /// Infrastructure score contributed by one affected asset.
    pub fn weight(self) -> f64 {
        match self {
            InfrastructureCategory::Hospital => 5000.0,
            InfrastructureCategory::Airport => 20000.0,
            InfrastructureCategory::Port => 25000.0,
            InfrastructureCategory::Power => 15000.0,
            InfrastructureCategory::Station => 3000.0,
            InfrastructureCategory::University => 2000.0,
            InfrastructureCategory::School => 1000.0,
        }
    }

    /// Human-readable label ("Hospital", "Airport", ...).
    pub fn label(self) -> &'static str {
        match self {
            InfrastructureCategory::Hospital => "Hospital",
            InfrastructureCategory::Airport => "Airport",
            InfrastructureCategory::Port => "Port",
            InfrastructureCategory::Power => "Power",
            InfrastructureCategory::Station => "Station",
            InfrastructureCategory::University => "University",
            InfrastructureCategory::School => "School",
        }
    }

    /// OpenStreetMap tag key and accepted values identifying this category.
    pub fn tag_rule(self) -> (&'static str, &'static [&'static str]) {
        match self {
            InfrastructureCategory::Hospital => ("amenity", &["hospital"]),
            InfrastructureCategory::Airport => ("aeroway", &["aerodrome"]),
            InfrastructureCategory::Port => ("harbour", &["yes"]),
            InfrastructureCategory::Power => ("power", &["plant", "substation"]),
            InfrastructureCategory::Station => ("railway", &["station"]),
            InfrastructureCategory::University => ("amenity", &["university"]),
            InfrastructureCategory::School => ("amenity", &["school"]),
        }
    }

    /// Whether a tag set identifies this category.
    pub fn matches(self, tags: &BTreeMap<String, String>) -> bool {
        let (key, values) = self.tag_rule();
        tags.get(key).is_some_and(|value| values.contains(&value.as_str()))
    }

    /// First category (in priority order) matched by a tag set.
    pub fn classify(tags: &BTreeMap<String, String>) -> Option<InfrastructureCategory> {
        Self::ALL.into_iter().find(|category| category.matches(tags))
    }
}

/// One of the three independent exposure data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureSource {
    Infrastructure,
    Population,
    LandUse,
}

/// Coarse tsunami threat of a water impact, banded by energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TsunamiLevel {
    Low,
    Medium,
    High,
}

impl TsunamiLevel {
    /// Band for an impact energy in megatons.
    pub fn from_megatons(megatons: f64) -> Self {
        use crate::constants::{TSUNAMI_HIGH_MEGATONS, TSUNAMI_MEDIUM_MEGATONS};

        if megatons < TSUNAMI_MEDIUM_MEGATONS {
            TsunamiLevel::Low
        } else if megatons < TSUNAMI_HIGH_MEGATONS {
            TsunamiLevel::Medium
        } else {
            TsunamiLevel::High
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            TsunamiLevel::Low => "Minor coastal flooding.",
            TsunamiLevel::Medium => "Significant inundation, evacuation recommended.",
            TsunamiLevel::High => "Catastrophic tsunami event.",
        }
    }
}
