//! Geospatial data layer for ImpactHorizon.
//!
//! Coordinate reference systems, analysis bounding boxes, gridded raster
//! loading (ESRI ASCII grid and the compact `.hgrd` format), and clipping.

pub use horizon_core as core;

pub mod asc;
pub mod error;
pub mod grid;
pub mod hgrd;
pub mod projection;

use std::path::Path;

// Re-export key types for convenience.
pub use error::RasterError;
pub use grid::{RasterGrid, RasterHeader, RasterWindow};
pub use projection::{analysis_half_width_deg, great_circle_km, BoundingBox, Crs};

/// Load a raster file, choosing the parser from the file extension.
///
/// `.hgrd` files carry their own CRS. ASCII grids carry none and are read as
/// geographic (EPSG:4326).
pub fn load_raster(path: &Path) -> Result<RasterGrid, RasterError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("hgrd") => hgrd::load_hgrd(path),
        Some("asc") => asc::load_asc(path, Crs::Wgs84),
        _ => Err(RasterError::invalid(format!(
            "unrecognized raster extension: {}",
            path.display()
        ))),
    }
}
