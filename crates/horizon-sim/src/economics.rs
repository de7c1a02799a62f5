//! Economic damage estimation.
//!
//! Converts exposure component scores into a monetary figure using a
//! per-point tariff table, then scales by a severity multiplier that grows
//! with log-energy. Pure: no retries, no I/O.

use tracing::debug;

use horizon_core::config::EconomicConfig;
use horizon_core::types::{ComponentScores, KineticEnergy, MonetaryDamage};

/// Undiscounted USD exposure for a set of component scores.
pub fn base_damage_usd(scores: &ComponentScores, config: &EconomicConfig) -> f64 {
    let t = &config.tariffs;
    scores.infrastructure * t.usd_per_infrastructure_point
        + scores.population * t.usd_per_person
        + scores.land_use * t.usd_per_land_point
}

/// Estimate monetary damage for an impact.
///
/// Returns [`MonetaryDamage::Zero`] when the energy is below the reportable
/// threshold or nothing of value is exposed.
pub fn estimate(
    scores: &ComponentScores,
    energy: KineticEnergy,
    config: &EconomicConfig,
) -> MonetaryDamage {
    let joules = energy.joules();
    if scores.is_zero() || joules.is_nan() || joules < config.energy_threshold_joules {
        return MonetaryDamage::Zero;
    }

    let base = base_damage_usd(scores, config);
    if base <= 0.0 {
        return MonetaryDamage::Zero;
    }

    let severity = config.severity.multiplier(joules);
    let damage = base * severity;
    debug!(
        base_usd = base,
        log10_energy = joules.log10(),
        severity,
        damage_usd = damage,
        "Estimated monetary damage"
    );

    MonetaryDamage::Usd(damage)
}
