//! Population scan: total head count under the analysis box.

use tracing::debug;

use horizon_geo::BoundingBox;

use super::sources::RasterSource;
use super::ScanOutcome;

/// Sum of positive population cells whose centers fall inside `bbox` (WGS84).
pub fn scan(source: &dyn RasterSource, bbox: &BoundingBox) -> ScanOutcome<f64> {
    let grid = match source.load() {
        Ok(grid) => grid,
        Err(e) => return ScanOutcome::Unavailable(e.to_string()),
    };

    let region = bbox.reproject(grid.crs());
    let Some(window) = grid.clip(&region) else {
        return ScanOutcome::OutOfBounds;
    };

    let total: f64 = window
        .valid_values()
        .filter(|v| *v > 0.0)
        .map(f64::from)
        .sum();
    debug!(
        cells = window.values.len(),
        population = total,
        "Population window summed"
    );
    ScanOutcome::Scored(total)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use horizon_geo::{Crs, RasterGrid, RasterHeader};

    fn population_grid(crs: Crs, origin: (f64, f64), cell_size: f64) -> Arc<RasterGrid> {
        #[rustfmt::skip]
        let values = vec![
            100.0, 200.0,   -9.0,
              0.0, -1.0,   50.0,
             10.0, 20.0,   f32::NAN,
        ];
        Arc::new(
            RasterGrid::new(
                RasterHeader {
                    crs,
                    origin_x: origin.0,
                    origin_y: origin.1,
                    cell_size,
                    width: 3,
                    height: 3,
                    nodata: Some(-9.0),
                },
                values,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_sums_valid_positive_cells() {
        let grid = population_grid(Crs::Wgs84, (0.0, 0.0), 1.0);
        let outcome = scan(&grid, &BoundingBox::new(-1.0, -1.0, 4.0, 4.0));
        // nodata, negative, zero and NaN cells contribute nothing
        assert_eq!(outcome, ScanOutcome::Scored(380.0));
    }

    #[test]
    fn test_partial_window() {
        let grid = population_grid(Crs::Wgs84, (0.0, 0.0), 1.0);
        // Only the north-west cell center (0.5, 2.5) is inside
        let outcome = scan(&grid, &BoundingBox::new(0.0, 2.0, 1.0, 3.0));
        assert_eq!(outcome, ScanOutcome::Scored(100.0));
    }

    #[test]
    fn test_disjoint_box_is_out_of_bounds() {
        let grid = population_grid(Crs::Wgs84, (0.0, 0.0), 1.0);
        let outcome = scan(&grid, &BoundingBox::new(50.0, 50.0, 51.0, 51.0));
        assert_eq!(outcome, ScanOutcome::OutOfBounds);
    }

    #[test]
    fn test_box_is_reprojected_to_raster_crs() {
        // 3 km cells around the Web Mercator origin
        let grid = population_grid(Crs::WebMercator, (-4500.0, -4500.0), 3000.0);
        let outcome = scan(&grid, &BoundingBox::new(-0.1, -0.1, 0.1, 0.1));
        assert_eq!(outcome, ScanOutcome::Scored(380.0));
    }
}
