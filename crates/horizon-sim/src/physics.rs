//! Impact physics: kinetic energy and damage radii from closed-form scaling laws.
//!
//! Pure and deterministic. Any finite energy produces finite, non-negative
//! radii; non-positive energies (zero diameter, zero velocity, grazing angle)
//! yield all-zero radii rather than a fault. Energies that overflow are
//! rejected by the engine before radii are computed.

use horizon_core::constants::*;
use horizon_core::enums::TargetSurface;
use horizon_core::types::{DamageRadii, ImpactorSpecification, KineticEnergy};

/// Energy and damage extents of one impact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactOutcome {
    pub energy: KineticEnergy,
    pub radii: DamageRadii,
}

/// Run the physics model for an impactor.
pub fn compute(impactor: &ImpactorSpecification) -> ImpactOutcome {
    let energy = kinetic_energy(impactor);
    ImpactOutcome {
        energy,
        radii: damage_radii(energy, impactor.target_surface),
    }
}

/// Kinetic energy delivered by the vertical velocity component.
pub fn kinetic_energy(impactor: &ImpactorSpecification) -> KineticEnergy {
    let velocity_ms = impactor.velocity_km_s * 1000.0;
    let vertical_ms = velocity_ms * impactor.angle_deg.to_radians().sin();
    KineticEnergy(0.5 * impactor.mass_kg() * vertical_ms * vertical_ms)
}

/// Damage radii in km (rounded to 2 decimals) for an energy and target surface.
pub fn damage_radii(energy: KineticEnergy, surface: TargetSurface) -> DamageRadii {
    let joules = energy.joules();
    if !(joules.is_finite() && joules > 0.0) {
        return DamageRadii::default();
    }
    let megatons = energy.megatons();

    DamageRadii {
        crater: round2(crater_diameter_km(joules, surface)),
        thermal: round2(THERMAL_COEFFICIENT_KM * megatons.powf(THERMAL_EXPONENT)),
        air_blast: round2(AIR_BLAST_COEFFICIENT_KM * megatons.cbrt()),
        seismic: round2(seismic_radius_km(joules)),
    }
}

/// Final crater diameter in km. Always zero for water targets.
fn crater_diameter_km(joules: f64, surface: TargetSurface) -> f64 {
    if surface == TargetSurface::Water {
        return 0.0;
    }
    let transient_m =
        surface.crater_coefficient() * joules.powf(1.0 / CRATER_ENERGY_EXPONENT_DIVISOR);
    transient_m * CRATER_COLLAPSE_FACTOR / 1000.0
}

/// Equivalent Richter magnitude of the impact.
pub fn seismic_magnitude(joules: f64) -> f64 {
    SEISMIC_MAGNITUDE_SLOPE * joules.log10() - SEISMIC_MAGNITUDE_OFFSET
}

/// Shaking radius in km; zero at or below the magnitude threshold.
fn seismic_radius_km(joules: f64) -> f64 {
    let magnitude = seismic_magnitude(joules);
    if magnitude > SEISMIC_MAGNITUDE_THRESHOLD {
        SEISMIC_RADIUS_COEFFICIENT_KM * 10f64.powf(magnitude / 2.0)
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impactor(diameter_m: f64, velocity_km_s: f64, angle_deg: f64) -> ImpactorSpecification {
        ImpactorSpecification {
            diameter_m,
            density_kg_m3: 3000.0,
            velocity_km_s,
            angle_deg,
            target_surface: TargetSurface::SedimentaryRock,
        }
    }

    #[test]
    fn test_energy_uses_vertical_component() {
        let vertical = kinetic_energy(&impactor(100.0, 20.0, 90.0));
        let oblique = kinetic_energy(&impactor(100.0, 20.0, 30.0));
        // sin(30°)² = 0.25
        assert!((oblique.joules() / vertical.joules() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_energy_formula() {
        let spec = impactor(10.0, 1.0, 90.0);
        let mass = 3000.0 * 4.0 / 3.0 * std::f64::consts::PI * 125.0;
        let expected = 0.5 * mass * 1000.0 * 1000.0;
        assert!((kinetic_energy(&spec).joules() - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_zero_angle_gives_zero_radii() {
        let outcome = compute(&impactor(100.0, 20.0, 0.0));
        assert_eq!(outcome.energy.joules(), 0.0);
        assert_eq!(outcome.radii, DamageRadii::default());
    }

    #[test]
    fn test_zero_diameter_is_safe() {
        let outcome = compute(&impactor(0.0, 20.0, 45.0));
        assert_eq!(outcome.radii, DamageRadii::default());
    }

    #[test]
    fn test_crater_coefficient_by_surface() {
        let energy = KineticEnergy(1e18);
        let sed = damage_radii(energy, TargetSurface::SedimentaryRock).crater;
        let cry = damage_radii(energy, TargetSurface::CrystallineRock).crater;
        assert!(sed > cry);
        // 0.08 / 0.07 ratio survives rounding at this scale
        assert!((sed / cry - 0.08 / 0.07).abs() < 1e-3);
        assert_eq!(damage_radii(energy, TargetSurface::Water).crater, 0.0);
    }

    #[test]
    fn test_one_megaton_radii() {
        let radii = damage_radii(KineticEnergy(JOULES_PER_MEGATON), TargetSurface::SedimentaryRock);
        assert_eq!(radii.thermal, 0.8);
        assert_eq!(radii.air_blast, 3.0);
        // M = 0.67 * 15.62 - 5.87 ≈ 4.6 → below threshold
        assert_eq!(radii.seismic, 0.0);
    }

    #[test]
    fn test_seismic_threshold() {
        // M > 5 requires log10(E) > 16.28
        assert!(seismic_magnitude(1e16) < 5.0);
        assert!(seismic_magnitude(1e17) > 5.0);
        assert_eq!(damage_radii(KineticEnergy(1e16), TargetSurface::Water).seismic, 0.0);
        assert!(damage_radii(KineticEnergy(1e17), TargetSurface::Water).seismic > 0.0);
    }

    #[test]
    fn test_radii_are_rounded() {
        let radii = compute(&impactor(150.0, 25.0, 45.0)).radii;
        for r in [radii.crater, radii.thermal, radii.air_blast, radii.seismic] {
            assert!(((r * 100.0).round() - r * 100.0).abs() < 1e-6, "{r} not rounded");
        }
    }
}
