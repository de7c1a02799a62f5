//! Coordinate reference systems, analysis bounding boxes, and distances.
//!
//! Rasters may be stored in geographic (EPSG:4326) or Web Mercator
//! (EPSG:3857) coordinates. Both are separable in longitude and latitude, so
//! an axis-aligned lat/lon box maps to an axis-aligned box in either system
//! and reprojecting its corners is exact.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use horizon_core::constants::{ANALYSIS_MARGIN, EARTH_RADIUS_KM, KM_PER_DEGREE};
use horizon_core::types::GeoPoint;

use crate::error::RasterError;

/// WGS84 semi-major axis used by Web Mercator (meters).
const MERCATOR_RADIUS_M: f64 = 6_378_137.0;

/// Latitude limit of the Web Mercator square (degrees).
const MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;

/// Coordinate reference system of a raster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crs {
    /// Geographic lat/lon in degrees (EPSG:4326).
    #[default]
    Wgs84,
    /// Spherical Web Mercator in meters (EPSG:3857).
    WebMercator,
}

impl Crs {
    pub fn from_epsg(code: u32) -> Result<Self, RasterError> {
        match code {
            4326 => Ok(Crs::Wgs84),
            3857 | 900913 => Ok(Crs::WebMercator),
            other => Err(RasterError::UnsupportedCrs(other)),
        }
    }

    pub fn epsg(self) -> u32 {
        match self {
            Crs::Wgs84 => 4326,
            Crs::WebMercator => 3857,
        }
    }

    /// Project a geographic point into this CRS (x = easting, y = northing).
    pub fn project(self, point: GeoPoint) -> DVec2 {
        match self {
            Crs::Wgs84 => DVec2::new(point.lon, point.lat),
            Crs::WebMercator => {
                let lat = point.lat.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT);
                let x = MERCATOR_RADIUS_M * point.lon.to_radians();
                let y = MERCATOR_RADIUS_M
                    * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0)
                        .tan()
                        .ln();
                DVec2::new(x, y)
            }
        }
    }

    /// Inverse of [`Crs::project`].
    pub fn unproject(self, xy: DVec2) -> GeoPoint {
        match self {
            Crs::Wgs84 => GeoPoint::new(xy.y, xy.x),
            Crs::WebMercator => {
                let lon = (xy.x / MERCATOR_RADIUS_M).to_degrees();
                let lat = (2.0 * (xy.y / MERCATOR_RADIUS_M).exp().atan()
                    - std::f64::consts::FRAC_PI_2)
                    .to_degrees();
                GeoPoint::new(lat, lon)
            }
        }
    }
}

/// Axis-aligned box. Units are those of the CRS it was built in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Square lat/lon box centered on a point with the given half-width (degrees).
    pub fn around(center: GeoPoint, half_width_deg: f64) -> Self {
        Self::new(
            center.lon - half_width_deg,
            center.lat - half_width_deg,
            center.lon + half_width_deg,
            center.lat + half_width_deg,
        )
    }

    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Zero (or negative) area.
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Whether (x, y) lies inside the box (edges inclusive).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.west && x <= self.east && y >= self.south && y <= self.north
    }

    /// Whether two boxes share any area. Touching edges do not count.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.west < other.east
            && other.west < self.east
            && self.south < other.north
            && other.south < self.north
    }

    /// Reproject a WGS84 box into `crs`.
    pub fn reproject(&self, crs: Crs) -> BoundingBox {
        let corners = [
            crs.project(GeoPoint::new(self.south, self.west)),
            crs.project(GeoPoint::new(self.south, self.east)),
            crs.project(GeoPoint::new(self.north, self.west)),
            crs.project(GeoPoint::new(self.north, self.east)),
        ];
        let min = corners.iter().copied().fold(DVec2::MAX, DVec2::min);
        let max = corners.iter().copied().fold(DVec2::MIN, DVec2::max);
        BoundingBox::new(min.x, min.y, max.x, max.y)
    }
}

/// Half-width in degrees of the square analysis region for an air-blast radius.
///
/// Uses a flat 111 km per degree for both axes; longitude convergence at high
/// latitude is not corrected.
pub fn analysis_half_width_deg(air_blast_km: f64) -> f64 {
    air_blast_km * ANALYSIS_MARGIN / KM_PER_DEGREE
}

/// Great-circle (haversine) distance between two points in kilometers.
pub fn great_circle_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}
