//! Tunable parameters for scoring, monetary estimation, and data sources.
//!
//! Every section has documented defaults and can be overridden from a JSON
//! file. Missing fields fall back to their defaults, so a config file only
//! needs to name what it changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::ComponentScores;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizonConfig {
    pub scoring: ScoringWeights,
    pub economics: EconomicConfig,
    pub sources: DataSources,
    pub retry: RetryPolicy,
}

impl HorizonConfig {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a configuration file if one is given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Weights combining the component scores into the total exposure score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub infrastructure: f64,
    pub population: f64,
    pub land_use: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            infrastructure: 1.0,
            population: 0.1,
            land_use: 0.5,
        }
    }
}

impl ScoringWeights {
    /// Weighted sum of the component scores.
    pub fn total(&self, scores: &ComponentScores) -> f64 {
        scores.infrastructure * self.infrastructure
            + scores.population * self.population
            + scores.land_use * self.land_use
    }
}

/// Economic damage model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicConfig {
    pub tariffs: DamageTariffs,
    pub severity: SeverityCurve,
    /// Impacts below this energy cause no reportable monetary damage (J).
    pub energy_threshold_joules: f64,
}

impl Default for EconomicConfig {
    fn default() -> Self {
        Self {
            tariffs: DamageTariffs::default(),
            severity: SeverityCurve::default(),
            energy_threshold_joules: 1e12,
        }
    }
}

/// USD value attached to one point of each component score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageTariffs {
    pub usd_per_infrastructure_point: f64,
    pub usd_per_person: f64,
    pub usd_per_land_point: f64,
}

impl Default for DamageTariffs {
    fn default() -> Self {
        Self {
            usd_per_infrastructure_point: 750_000.0,
            usd_per_person: 120_000.0,
            usd_per_land_point: 2_500.0,
        }
    }
}

impl DamageTariffs {
    /// Lower calibration producing more conservative estimates.
    pub fn conservative() -> Self {
        Self {
            usd_per_infrastructure_point: 45_000.0,
            usd_per_person: 10_000.0,
            usd_per_land_point: 500.0,
        }
    }
}

/// Fraction of nominal exposure destroyed, as a function of log-energy:
/// `clamp((log10(E) - log_energy_offset) / divisor, floor, cap)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityCurve {
    pub log_energy_offset: f64,
    pub divisor: f64,
    pub floor: f64,
    /// `None` leaves the multiplier unbounded above.
    pub cap: Option<f64>,
}

impl Default for SeverityCurve {
    fn default() -> Self {
        Self {
            log_energy_offset: 14.0,
            divisor: 4.0,
            floor: 0.1,
            cap: Some(5.0),
        }
    }
}

impl SeverityCurve {
    /// Severity multiplier for an impact energy in joules.
    pub fn multiplier(&self, energy_joules: f64) -> f64 {
        let raw = (energy_joules.log10() - self.log_energy_offset) / self.divisor;
        let floored = raw.max(self.floor);
        match self.cap {
            Some(cap) => floored.min(cap),
            None => floored,
        }
    }
}

/// Locations of the exposure data sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSources {
    /// Gridded population counts (`.hgrd` or `.asc`).
    pub population_raster: Option<PathBuf>,
    /// Gridded land-cover class codes (`.hgrd` or `.asc`).
    pub land_cover_raster: Option<PathBuf>,
    /// Overpass API interpreter endpoint. `None` disables the infrastructure scan.
    pub overpass_url: Option<String>,
    /// Per-request timeout for the point-of-interest source (seconds).
    pub request_timeout_secs: u64,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            population_raster: Some(PathBuf::from("data/population.hgrd")),
            land_cover_raster: Some(PathBuf::from("data/land_cover.hgrd")),
            overpass_url: Some("https://overpass-api.de/api/interpreter".to_string()),
            request_timeout_secs: 30,
        }
    }
}

/// Bounded exponential backoff for transient network failures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 500,
            max_delay_ms: 4000,
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Policy that tries once and never waits.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay_ms: 0,
            max_delay_ms: 0,
            multiplier: 1.0,
        }
    }

    /// Delay before retry number `attempt` (1-based: the wait after the first failure).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let delay_ms = self.initial_delay_ms as f64 * self.multiplier.powi(exponent);
        let capped = delay_ms.min(self.max_delay_ms as f64).max(0.0);
        Duration::from_millis(capped as u64)
    }
}
