//! Land-use scan: weighted land-cover class counts under the analysis box.

use std::collections::BTreeMap;

use tracing::debug;

use horizon_core::constants::land_use_weight;
use horizon_geo::{BoundingBox, RasterWindow};

use super::sources::RasterSource;
use super::ScanOutcome;

/// Σ weight(class) × pixel count over land-cover cells inside `bbox` (WGS84).
pub fn scan(source: &dyn RasterSource, bbox: &BoundingBox) -> ScanOutcome<f64> {
    let grid = match source.load() {
        Ok(grid) => grid,
        Err(e) => return ScanOutcome::Unavailable(e.to_string()),
    };

    let region = bbox.reproject(grid.crs());
    let Some(window) = grid.clip(&region) else {
        return ScanOutcome::OutOfBounds;
    };

    let histogram = class_histogram(&window);
    let score = histogram
        .iter()
        .map(|(&class, &count)| land_use_weight(class) * count as f64)
        .sum();
    debug!(classes = ?histogram, score, "Land-cover window scored");
    ScanOutcome::Scored(score)
}

/// Pixel count per land-cover class code.
///
/// Nodata cells are skipped, as are non-integral values, which name no class.
pub fn class_histogram(window: &RasterWindow) -> BTreeMap<i64, u64> {
    let mut counts = BTreeMap::new();
    for value in window.valid_values() {
        if value.fract() != 0.0 {
            continue;
        }
        *counts.entry(value as i64).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use horizon_geo::{Crs, RasterGrid, RasterHeader};

    fn land_cover() -> Arc<RasterGrid> {
        #[rustfmt::skip]
        let values = vec![
            8.0, 8.0, 5.0, 0.0,
            2.0, 4.0, 1.0, 11.0,
            3.0, 8.0, 7.0, 0.0,
        ];
        Arc::new(
            RasterGrid::new(
                RasterHeader {
                    crs: Crs::Wgs84,
                    origin_x: 0.0,
                    origin_y: 0.0,
                    cell_size: 1.0,
                    width: 4,
                    height: 3,
                    nodata: Some(0.0),
                },
                values,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_histogram_skips_nodata() {
        let grid = land_cover();
        let window = grid.clip(&grid.bounds()).unwrap();
        let histogram = class_histogram(&window);
        assert_eq!(histogram.get(&8), Some(&3));
        assert_eq!(histogram.get(&0), None);
        assert_eq!(histogram.values().sum::<u64>(), 10);
    }

    #[test]
    fn test_weighted_score() {
        let grid = land_cover();
        let outcome = scan(&grid, &BoundingBox::new(-1.0, -1.0, 5.0, 4.0));
        // 3 × class 8 (100) + class 5 (10) + class 2 (5) + class 4 (2); others weigh 0
        assert_eq!(outcome, ScanOutcome::Scored(317.0));
    }

    #[test]
    fn test_fractional_values_are_not_classes() {
        let grid = Arc::new(
            RasterGrid::new(
                RasterHeader {
                    crs: Crs::Wgs84,
                    origin_x: 0.0,
                    origin_y: 0.0,
                    cell_size: 1.0,
                    width: 3,
                    height: 1,
                    nodata: None,
                },
                vec![7.6, 8.0, 4.5],
            )
            .unwrap(),
        );
        let window = grid.clip(&grid.bounds()).unwrap();
        assert_eq!(class_histogram(&window), BTreeMap::from([(8, 1)]));
        assert_eq!(scan(&grid, &grid.bounds()), ScanOutcome::Scored(100.0));
    }

    #[test]
    fn test_disjoint_box_is_out_of_bounds() {
        let outcome = scan(&land_cover(), &BoundingBox::new(10.0, 10.0, 11.0, 11.0));
        assert_eq!(outcome, ScanOutcome::OutOfBounds);
    }
}
