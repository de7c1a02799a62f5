//! Scenario resolution: catalog asteroid or custom impactor → physics input.

use serde::{Deserialize, Serialize};

use horizon_core::catalog;
use horizon_core::constants::DEFAULT_IMPACTOR_DENSITY;
use horizon_core::enums::TargetSurface;
use horizon_core::types::{GeoPoint, ImpactorSpecification};
use horizon_core::HorizonError;

/// A scenario as submitted by a client.
///
/// Either `diameter` (custom impactor) or `asteroid_id` (catalog entry) must
/// be given; `diameter` takes precedence when both are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub target: GeoPoint,
    /// Entry velocity in km/s.
    pub velocity: f64,
    /// Impact angle from horizontal in degrees.
    pub angle: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asteroid_id: Option<String>,
    /// Custom impactor diameter in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
    /// Custom impactor density in kg/m³.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_surface: Option<TargetSurface>,
}

impl ScenarioRequest {
    /// Custom-impactor request.
    pub fn custom(target: GeoPoint, diameter: f64, velocity: f64, angle: f64) -> Self {
        Self {
            target,
            velocity,
            angle,
            asteroid_id: None,
            diameter: Some(diameter),
            density: None,
            target_surface: None,
        }
    }

    /// Catalog request.
    pub fn catalog(target: GeoPoint, asteroid_id: &str, velocity: f64, angle: f64) -> Self {
        Self {
            target,
            velocity,
            angle,
            asteroid_id: Some(asteroid_id.to_string()),
            diameter: None,
            density: None,
            target_surface: None,
        }
    }

    /// Resolve into an impactor specification and target location.
    ///
    /// Only the catalog lookup is checked here; parameter ranges are validated
    /// by the engine before physics runs.
    pub fn resolve(&self) -> Result<(ImpactorSpecification, GeoPoint), HorizonError> {
        let (diameter_m, density_kg_m3) = match (self.diameter, self.asteroid_id.as_deref()) {
            (Some(diameter), _) => (
                diameter,
                self.density.unwrap_or(DEFAULT_IMPACTOR_DENSITY),
            ),
            (None, Some(id)) => {
                let entry = catalog::find(id)
                    .ok_or_else(|| HorizonError::UnknownAsteroid(id.to_string()))?;
                (entry.diameter_m, entry.density_kg_m3)
            }
            (None, None) => {
                return Err(HorizonError::invalid(
                    "diameter",
                    "either diameter or asteroid_id is required",
                ))
            }
        };

        let impactor = ImpactorSpecification {
            diameter_m,
            density_kg_m3,
            velocity_km_s: self.velocity,
            angle_deg: self.angle,
            target_surface: self.target_surface.unwrap_or_default(),
        };
        Ok((impactor, self.target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mumbai() -> GeoPoint {
        GeoPoint::new(19.076, 72.8777)
    }

    #[test]
    fn test_custom_uses_default_density() {
        let (spec, target) = ScenarioRequest::custom(mumbai(), 150.0, 25.0, 45.0)
            .resolve()
            .unwrap();
        assert_eq!(spec.diameter_m, 150.0);
        assert_eq!(spec.density_kg_m3, 3000.0);
        assert_eq!(spec.target_surface, TargetSurface::SedimentaryRock);
        assert_eq!(target, mumbai());
    }

    #[test]
    fn test_catalog_entry() {
        let (spec, _) = ScenarioRequest::catalog(mumbai(), "101955_bennu", 12.0, 60.0)
            .resolve()
            .unwrap();
        assert_eq!(spec.diameter_m, 490.0);
        assert_eq!(spec.density_kg_m3, 1190.0);
        assert_eq!(spec.velocity_km_s, 12.0);
        assert_eq!(spec.angle_deg, 60.0);
    }

    #[test]
    fn test_diameter_overrides_catalog() {
        let mut request = ScenarioRequest::catalog(mumbai(), "custom", 20.0, 45.0);
        request.diameter = Some(50.0);
        request.density = Some(2000.0);
        let (spec, _) = request.resolve().unwrap();
        assert_eq!(spec.diameter_m, 50.0);
        assert_eq!(spec.density_kg_m3, 2000.0);
    }

    #[test]
    fn test_unknown_asteroid() {
        let err = ScenarioRequest::catalog(mumbai(), "custom", 20.0, 45.0)
            .resolve()
            .unwrap_err();
        assert!(matches!(err, HorizonError::UnknownAsteroid(ref id) if id == "custom"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_missing_impactor() {
        let mut request = ScenarioRequest::custom(mumbai(), 1.0, 20.0, 45.0);
        request.diameter = None;
        let err = request.resolve().unwrap_err();
        assert!(matches!(err, HorizonError::InvalidInput { field: "diameter", .. }));
    }

    #[test]
    fn test_request_json_shape() {
        let json = r#"{
            "target": {"lat": 19.076, "lon": 72.8777},
            "angle": 45, "velocity": 20, "asteroid_id": "99942_apophis",
            "target_surface": "water"
        }"#;
        let request: ScenarioRequest = serde_json::from_str(json).unwrap();
        let (spec, _) = request.resolve().unwrap();
        assert_eq!(spec.diameter_m, 370.0);
        assert_eq!(spec.target_surface, TargetSurface::Water);
    }
}
