//! Catalog of well-known near-Earth asteroids.
//!
//! Physical parameters from the JPL Small-Body Database.

use serde::Serialize;

/// A named catalog asteroid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub diameter_m: f64,
    pub density_kg_m3: f64,
    pub description: &'static str,
}

/// All catalog entries.
pub const CATALOG: [CatalogEntry; 4] = [
    CatalogEntry {
        id: "99942_apophis",
        name: "99942 Apophis (God of Chaos)",
        diameter_m: 370.0,
        density_kg_m3: 2600.0,
        description: "S-type asteroid; a 2004 observation briefly suggested a 2029 impact, \
                      since ruled out. Close flyby on April 13, 2029.",
    },
    CatalogEntry {
        id: "101955_bennu",
        name: "101955 Bennu (OSIRIS-REx Target)",
        diameter_m: 490.0,
        density_kg_m3: 1190.0,
        description: "C-type rubble pile sampled by OSIRIS-REx; the sample capsule \
                      returned to Earth in 2023.",
    },
    CatalogEntry {
        id: "25143_itokawa",
        name: "25143 Itokawa (Hayabusa Target)",
        diameter_m: 535.0,
        density_kg_m3: 1900.0,
        description: "Peanut-shaped S-type rubble pile; first asteroid with a \
                      successful sample return.",
    },
    CatalogEntry {
        id: "162173_ryugu",
        name: "162173 Ryugu (Hayabusa2 Target)",
        diameter_m: 900.0,
        density_kg_m3: 1190.0,
        description: "Spinning-top-shaped C-type asteroid sampled by Hayabusa2.",
    },
];

/// Look up a catalog entry by id.
pub fn find(id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.id == id)
}
