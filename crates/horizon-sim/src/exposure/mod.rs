//! Exposure analysis: what lies inside the damage footprint.
//!
//! Three independent scans (infrastructure, population, land use) run in
//! parallel against their own data sources. Each returns a [`ScanOutcome`];
//! a scan that cannot produce a score contributes zero and a [`Diagnostic`]
//! instead of failing the scenario.

pub mod infrastructure;
pub mod land_use;
pub mod overpass;
pub mod population;
pub mod retry;
pub mod sources;

use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use horizon_core::config::{HorizonConfig, ScoringWeights};
use horizon_core::enums::ExposureSource;
use horizon_core::types::{ComponentScores, DamageRadii, Diagnostic, EconomicImpact, GeoPoint};
use horizon_core::HorizonError;
use horizon_geo::{analysis_half_width_deg, BoundingBox};

use infrastructure::InfrastructureExposure;
use overpass::OverpassClient;
use sources::{FileRaster, PoiSource, RasterSource, UnavailableSource};

/// Result of one exposure scan.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome<T> {
    Scored(T),
    /// Source missing, unreachable, or unreadable.
    Unavailable(String),
    /// Source data does not cover the analysis region.
    OutOfBounds,
}

/// Weighted exposure plus any recovered source failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExposureReport {
    pub impact: EconomicImpact,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the three exposure scans around an impact point.
pub struct ExposureAnalyzer {
    poi: Box<dyn PoiSource>,
    population: Box<dyn RasterSource>,
    land_cover: Box<dyn RasterSource>,
    weights: ScoringWeights,
}

impl ExposureAnalyzer {
    pub fn new(
        poi: Box<dyn PoiSource>,
        population: Box<dyn RasterSource>,
        land_cover: Box<dyn RasterSource>,
        weights: ScoringWeights,
    ) -> Self {
        Self {
            poi,
            population,
            land_cover,
            weights,
        }
    }

    /// Build the live sources named in the configuration.
    ///
    /// Unset sources become [`UnavailableSource`]s so scenarios still run.
    pub fn from_config(config: &HorizonConfig) -> Result<Self, HorizonError> {
        let sources = &config.sources;

        let poi: Box<dyn PoiSource> = match &sources.overpass_url {
            Some(url) => Box::new(
                OverpassClient::new(
                    url.as_str(),
                    Duration::from_secs(sources.request_timeout_secs),
                    config.retry,
                )
                .map_err(|e| HorizonError::Internal(e.to_string()))?,
            ),
            None => Box::new(UnavailableSource::new("no Overpass endpoint configured")),
        };

        Ok(Self::new(
            poi,
            raster_source(sources.population_raster.as_deref(), "population"),
            raster_source(sources.land_cover_raster.as_deref(), "land-cover"),
            config.scoring,
        ))
    }

    /// Score everything exposed to an impact at `location`.
    ///
    /// Source failures become zero scores plus diagnostics. Only a panic
    /// inside a scan is reported as an error.
    pub fn analyze(
        &self,
        location: GeoPoint,
        radii: &DamageRadii,
    ) -> Result<ExposureReport, HorizonError> {
        let bbox = BoundingBox::around(location, analysis_half_width_deg(radii.air_blast));
        if bbox.is_degenerate() {
            debug!(?location, "Empty analysis region, skipping exposure scans");
            return Ok(ExposureReport::default());
        }

        debug!(
            poi = %self.poi.label(),
            population = %self.population.label(),
            land_cover = %self.land_cover.label(),
            ?bbox,
            "Starting exposure scans"
        );

        let air_blast = radii.air_blast;
        let (infrastructure, population, land_use) = thread::scope(|s| {
            let infrastructure = s.spawn(|| {
                infrastructure::scan(self.poi.as_ref(), location, &bbox, air_blast)
            });
            let population = s.spawn(|| population::scan(self.population.as_ref(), &bbox));
            let land_use = s.spawn(|| land_use::scan(self.land_cover.as_ref(), &bbox));
            (infrastructure.join(), population.join(), land_use.join())
        });

        let infrastructure = infrastructure.map_err(|_| scan_panicked("infrastructure"))?;
        let population = population.map_err(|_| scan_panicked("population"))?;
        let land_use = land_use.map_err(|_| scan_panicked("land-use"))?;

        let mut diagnostics = Vec::new();
        let InfrastructureExposure { score, assets } =
            settle(ExposureSource::Infrastructure, infrastructure, &mut diagnostics)
                .unwrap_or_default();
        let component_scores = ComponentScores {
            infrastructure: score,
            population: settle(ExposureSource::Population, population, &mut diagnostics)
                .unwrap_or(0.0),
            land_use: settle(ExposureSource::LandUse, land_use, &mut diagnostics).unwrap_or(0.0),
        };

        let total_score = round2(self.weights.total(&component_scores));
        debug!(
            ?component_scores,
            total_score,
            assets = assets.len(),
            "Exposure scans complete"
        );

        Ok(ExposureReport {
            impact: EconomicImpact {
                total_score,
                component_scores,
                affected_infrastructure: assets,
            },
            diagnostics,
        })
    }
}

fn raster_source(path: Option<&std::path::Path>, kind: &str) -> Box<dyn RasterSource> {
    match path {
        Some(path) => Box::new(FileRaster::new(path)),
        None => Box::new(UnavailableSource::new(format!(
            "no {kind} raster configured"
        ))),
    }
}

/// Unwrap a scored outcome, recording a diagnostic for anything else.
fn settle<T>(
    source: ExposureSource,
    outcome: ScanOutcome<T>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<T> {
    let message = match outcome {
        ScanOutcome::Scored(value) => return Some(value),
        ScanOutcome::Unavailable(reason) => reason,
        ScanOutcome::OutOfBounds => "data does not cover the analysis region".to_string(),
    };
    warn!(?source, %message, "Exposure source contributed no score");
    diagnostics.push(Diagnostic { source, message });
    None
}

fn scan_panicked(scan: &str) -> HorizonError {
    HorizonError::Internal(format!("{scan} scan panicked"))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
