//! Data-source seams for the exposure scans.
//!
//! The analyzer only sees these traits, so the live Overpass client and the
//! on-disk rasters can be swapped for in-memory data in tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use horizon_core::types::GeoPoint;
use horizon_geo::{load_raster, BoundingBox, RasterGrid};

/// Failure reading an exposure data source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Local data file does not exist. Never retried.
    #[error("data file not found: {}", .0.display())]
    Missing(PathBuf),

    /// Network hiccup, timeout, rate limit, or server-side failure.
    #[error("transient source failure: {0}")]
    Transient(String),

    /// Request rejected (malformed query, forbidden, ...). Not retried.
    #[error("source request rejected: {0}")]
    Permanent(String),

    /// Data was read but could not be interpreted.
    #[error("malformed source data: {0}")]
    Format(String),

    /// No source configured.
    #[error("{0}")]
    Unconfigured(String),
}

impl SourceError {
    pub fn is_transient(&self) -> bool {
        matches!(self, SourceError::Transient(_))
    }
}

/// A point of interest returned by the infrastructure data source.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiFeature {
    /// Representative point (node position or way/relation center).
    pub location: GeoPoint,
    pub tags: BTreeMap<String, String>,
}

impl PoiFeature {
    pub fn new(location: GeoPoint, tags: &[(&str, &str)]) -> Self {
        Self {
            location,
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.tags
            .get("name")
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
    }
}

/// Queryable point-of-interest source.
pub trait PoiSource: Send + Sync {
    /// Short label for logs.
    fn label(&self) -> String;

    /// Infrastructure features inside a WGS84 bounding box.
    fn features_within(&self, bbox: &BoundingBox) -> Result<Vec<PoiFeature>, SourceError>;
}

/// In-memory features; the box filter is applied on query.
impl PoiSource for Vec<PoiFeature> {
    fn label(&self) -> String {
        format!("in-memory ({} features)", self.len())
    }

    fn features_within(&self, bbox: &BoundingBox) -> Result<Vec<PoiFeature>, SourceError> {
        Ok(self
            .iter()
            .filter(|f| bbox.contains(f.location.lon, f.location.lat))
            .cloned()
            .collect())
    }
}

/// Gridded raster source.
pub trait RasterSource: Send + Sync {
    /// Short label for logs.
    fn label(&self) -> String;

    fn load(&self) -> Result<Arc<RasterGrid>, SourceError>;
}

/// Raster read from disk on every scan.
#[derive(Debug, Clone)]
pub struct FileRaster {
    path: PathBuf,
}

impl FileRaster {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RasterSource for FileRaster {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Arc<RasterGrid>, SourceError> {
        match load_raster(&self.path) {
            Ok(grid) => Ok(Arc::new(grid)),
            Err(e) if e.is_not_found() => Err(SourceError::Missing(self.path.clone())),
            Err(e) => Err(SourceError::Format(format!("{}: {e}", self.path.display()))),
        }
    }
}

impl RasterSource for Arc<RasterGrid> {
    fn label(&self) -> String {
        format!(
            "in-memory raster ({}x{})",
            self.header.width, self.header.height
        )
    }

    fn load(&self) -> Result<Arc<RasterGrid>, SourceError> {
        Ok(Arc::clone(self))
    }
}

/// Placeholder for a source that is not configured or cannot be reached.
#[derive(Debug, Clone)]
pub struct UnavailableSource {
    reason: String,
}

impl UnavailableSource {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl PoiSource for UnavailableSource {
    fn label(&self) -> String {
        "unavailable".into()
    }

    fn features_within(&self, _bbox: &BoundingBox) -> Result<Vec<PoiFeature>, SourceError> {
        Err(SourceError::Unconfigured(self.reason.clone()))
    }
}

impl RasterSource for UnavailableSource {
    fn label(&self) -> String {
        "unavailable".into()
    }

    fn load(&self) -> Result<Arc<RasterGrid>, SourceError> {
        Err(SourceError::Unconfigured(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_raster() {
        let source = FileRaster::new("/nonexistent/population.hgrd");
        let err = source.load().unwrap_err();
        assert!(matches!(err, SourceError::Missing(_)));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_unrecognized_extension_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("population.tif");
        std::fs::write(&path, b"II*\0").unwrap();
        let err = FileRaster::new(&path).load().unwrap_err();
        assert!(matches!(err, SourceError::Format(_)));
    }

    #[test]
    fn test_in_memory_pois_filter_by_box() {
        let pois = vec![
            PoiFeature::new(GeoPoint::new(0.0, 0.0), &[("amenity", "hospital")]),
            PoiFeature::new(GeoPoint::new(5.0, 5.0), &[("amenity", "school")]),
        ];
        let found = pois
            .features_within(&BoundingBox::new(-1.0, -1.0, 1.0, 1.0))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].tags["amenity"], "hospital");
    }

    #[test]
    fn test_blank_name_is_none() {
        let f = PoiFeature::new(GeoPoint::new(0.0, 0.0), &[("name", "  ")]);
        assert_eq!(f.name(), None);
    }
}
