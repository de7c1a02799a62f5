//! Infrastructure scan: named assets inside the air-blast radius.

use horizon_core::enums::InfrastructureCategory;
use horizon_core::types::{AffectedAsset, GeoPoint};
use horizon_geo::{great_circle_km, BoundingBox};

use super::sources::PoiSource;
use super::ScanOutcome;

/// Score and asset list from the infrastructure scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfrastructureExposure {
    /// Sum of category weights.
    pub score: f64,
    /// Affected assets in the order the source returned them.
    pub assets: Vec<AffectedAsset>,
}

/// Query `bbox` and keep classified features within `air_blast_km` of `center`.
pub fn scan(
    source: &dyn PoiSource,
    center: GeoPoint,
    bbox: &BoundingBox,
    air_blast_km: f64,
) -> ScanOutcome<InfrastructureExposure> {
    let features = match source.features_within(bbox) {
        Ok(features) => features,
        Err(e) => return ScanOutcome::Unavailable(e.to_string()),
    };

    let mut exposure = InfrastructureExposure::default();
    for feature in &features {
        let Some(category) = InfrastructureCategory::classify(&feature.tags) else {
            continue;
        };
        if great_circle_km(center, feature.location) > air_blast_km {
            continue;
        }
        exposure.score += category.weight();
        exposure.assets.push(AffectedAsset {
            name: asset_name(feature.name(), category),
            category,
        });
    }
    ScanOutcome::Scored(exposure)
}

fn asset_name(name: Option<&str>, category: InfrastructureCategory) -> String {
    match name {
        Some(name) => name.to_string(),
        None => format!("Unnamed {}", category.label()),
    }
}
