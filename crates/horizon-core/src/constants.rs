//! Physical constants and scaling-law coefficients.

// --- Energy ---

/// Joules per megaton of TNT.
pub const JOULES_PER_MEGATON: f64 = 4.184e15;

/// Default bulk density for a custom impactor (kg/m³, stony asteroid).
pub const DEFAULT_IMPACTOR_DENSITY: f64 = 3000.0;

// --- Crater (pi-group scaling) ---

/// Transient crater coefficient for sedimentary rock targets.
pub const CRATER_K_SEDIMENTARY: f64 = 0.08;

/// Transient crater coefficient for crystalline rock (and anything else).
pub const CRATER_K_CRYSTALLINE: f64 = 0.07;

/// Energy exponent divisor: transient diameter = k * E^(1/3.4).
pub const CRATER_ENERGY_EXPONENT_DIVISOR: f64 = 3.4;

/// Final crater diameter relative to the transient crater.
pub const CRATER_COLLAPSE_FACTOR: f64 = 1.25;

// --- Thermal radiation ---

/// Thermal radius coefficient (km per Mt^0.41).
pub const THERMAL_COEFFICIENT_KM: f64 = 0.8;

/// Thermal radius energy exponent.
pub const THERMAL_EXPONENT: f64 = 0.41;

// --- Air blast ---

/// Air-blast radius coefficient (km per Mt^(1/3)).
pub const AIR_BLAST_COEFFICIENT_KM: f64 = 3.0;

// --- Seismic ---

/// Richter magnitude slope against log10(E joules).
pub const SEISMIC_MAGNITUDE_SLOPE: f64 = 0.67;

/// Richter magnitude offset.
pub const SEISMIC_MAGNITUDE_OFFSET: f64 = 5.87;

/// Magnitudes at or below this produce no reportable shaking radius.
pub const SEISMIC_MAGNITUDE_THRESHOLD: f64 = 5.0;

/// Seismic radius coefficient (km): radius = 1.5 * 10^(M/2).
pub const SEISMIC_RADIUS_COEFFICIENT_KM: f64 = 1.5;

// --- Tsunami ---

/// Water-impact energies below this (Mt) pose a low tsunami threat.
pub const TSUNAMI_MEDIUM_MEGATONS: f64 = 50.0;

/// Water-impact energies at or above this (Mt) pose a high tsunami threat.
pub const TSUNAMI_HIGH_MEGATONS: f64 = 500.0;

// --- Geography ---

/// Approximate kilometers per degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Analysis box margin over the air-blast radius.
pub const ANALYSIS_MARGIN: f64 = 1.1;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// --- Land cover ---

/// Land-value weight per pixel for each land-cover class code.
/// Codes missing from this table contribute nothing.
pub const LAND_USE_CLASS_WEIGHTS: [(i64, f64); 9] = [
    (1, 0.0),
    (2, 5.0),
    (4, 2.0),
    (5, 10.0),
    (7, 0.0),
    (8, 100.0),
    (9, 0.0),
    (10, 0.0),
    (11, 0.0),
];

/// Look up the land-value weight for a land-cover class code.
pub fn land_use_weight(class_code: i64) -> f64 {
    LAND_USE_CLASS_WEIGHTS
        .iter()
        .find(|(code, _)| *code == class_code)
        .map_or(0.0, |(_, weight)| *weight)
}
