//! RasterGrid: a loaded single-band raster with clip queries.

use crate::error::RasterError;
use crate::projection::{BoundingBox, Crs};

/// Raster header metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterHeader {
    pub crs: Crs,
    /// West edge in CRS units.
    pub origin_x: f64,
    /// South edge in CRS units.
    pub origin_y: f64,
    /// Cell edge length in CRS units (square cells).
    pub cell_size: f64,
    /// Number of columns (west to east).
    pub width: u32,
    /// Number of rows (north to south).
    pub height: u32,
    /// Sentinel marking cells without data.
    pub nodata: Option<f64>,
}

impl RasterHeader {
    /// North edge in CRS units.
    pub fn north(&self) -> f64 {
        self.origin_y + self.height as f64 * self.cell_size
    }

    /// East edge in CRS units.
    pub fn east(&self) -> f64 {
        self.origin_x + self.width as f64 * self.cell_size
    }

    /// Full extent of the raster in its own CRS.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.origin_x, self.origin_y, self.east(), self.north())
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Loaded raster grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGrid {
    pub header: RasterHeader,
    /// Cell values, row-major (north-to-south, west-to-east).
    pub values: Vec<f32>,
}

impl RasterGrid {
    /// Create a grid, checking that the value count matches the header.
    pub fn new(header: RasterHeader, values: Vec<f32>) -> Result<Self, RasterError> {
        if !(header.cell_size.is_finite() && header.cell_size > 0.0) {
            return Err(RasterError::invalid(format!(
                "cell size must be positive, got {}",
                header.cell_size
            )));
        }
        if values.len() != header.cell_count() {
            return Err(RasterError::invalid(format!(
                "expected {} cells ({}x{}), got {}",
                header.cell_count(),
                header.width,
                header.height,
                values.len()
            )));
        }
        Ok(Self { header, values })
    }

    pub fn crs(&self) -> Crs {
        self.header.crs
    }

    pub fn bounds(&self) -> BoundingBox {
        self.header.bounds()
    }

    /// Value at integer grid coordinates.
    pub fn value(&self, row: usize, col: usize) -> Option<f32> {
        let h = &self.header;
        if row >= h.height as usize || col >= h.width as usize {
            return None;
        }
        self.values.get(row * h.width as usize + col).copied()
    }

    /// Cells whose centers fall inside `bbox` (given in this raster's CRS).
    ///
    /// Returns None when the box does not overlap the raster at all.
    pub fn clip(&self, bbox: &BoundingBox) -> Option<RasterWindow> {
        let h = &self.header;
        if h.width == 0 || h.height == 0 || !self.bounds().intersects(bbox) {
            return None;
        }

        let cs = h.cell_size;
        let north = h.north();

        // Center of column c is origin_x + (c + 0.5) * cs.
        let col_lo = ((bbox.west - h.origin_x) / cs - 0.5).ceil().max(0.0);
        let col_hi = ((bbox.east - h.origin_x) / cs - 0.5)
            .floor()
            .min(h.width as f64 - 1.0);
        // Center of row r is north - (r + 0.5) * cs.
        let row_lo = ((north - bbox.north) / cs - 0.5).ceil().max(0.0);
        let row_hi = ((north - bbox.south) / cs - 0.5)
            .floor()
            .min(h.height as f64 - 1.0);

        if col_lo > col_hi || row_lo > row_hi {
            return Some(RasterWindow::empty(h.nodata));
        }

        let (c0, c1) = (col_lo as usize, col_hi as usize);
        let (r0, r1) = (row_lo as usize, row_hi as usize);
        let width = c1 - c0 + 1;
        let height = r1 - r0 + 1;

        let mut values = Vec::with_capacity(width * height);
        for r in r0..=r1 {
            let start = r * h.width as usize;
            values.extend_from_slice(&self.values[start + c0..=start + c1]);
        }

        Some(RasterWindow {
            width,
            height,
            values,
            nodata: h.nodata,
        })
    }
}

/// Sub-grid cut out of a raster by [`RasterGrid::clip`].
#[derive(Debug, Clone, PartialEq)]
pub struct RasterWindow {
    pub width: usize,
    pub height: usize,
    pub values: Vec<f32>,
    pub nodata: Option<f64>,
}

impl RasterWindow {
    fn empty(nodata: Option<f64>) -> Self {
        Self {
            width: 0,
            height: 0,
            values: Vec::new(),
            nodata,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether a cell value is the raster's nodata sentinel.
    pub fn is_nodata(&self, value: f32) -> bool {
        self.nodata.is_some_and(|nd| value == nd as f32)
    }

    /// Finite cell values that are not the nodata sentinel.
    pub fn valid_values(&self) -> impl Iterator<Item = f32> + '_ {
        self.values
            .iter()
            .copied()
            .filter(move |v| v.is_finite() && !self.is_nodata(*v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4×4 geographic grid covering lon 10..14, lat 20..24 with 1° cells.
    fn make_test_grid() -> RasterGrid {
        #[rustfmt::skip]
        let values: Vec<f32> = vec![
             1.0,  2.0,  3.0,  4.0,
             5.0,  6.0,  7.0,  8.0,
             9.0, 10.0, 11.0, 12.0,
            13.0, 14.0, 15.0, -1.0,
        ];
        RasterGrid::new(
            RasterHeader {
                crs: Crs::Wgs84,
                origin_x: 10.0,
                origin_y: 20.0,
                cell_size: 1.0,
                width: 4,
                height: 4,
                nodata: Some(-1.0),
            },
            values,
        )
        .unwrap()
    }

    #[test]
    fn test_header_edges() {
        let grid = make_test_grid();
        assert_eq!(grid.header.north(), 24.0);
        assert_eq!(grid.header.east(), 14.0);
        assert_eq!(grid.bounds(), BoundingBox::new(10.0, 20.0, 14.0, 24.0));
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let header = make_test_grid().header;
        assert!(RasterGrid::new(header, vec![0.0; 3]).is_err());
    }

    #[test]
    fn test_value_lookup() {
        let grid = make_test_grid();
        assert_eq!(grid.value(0, 0), Some(1.0));
        assert_eq!(grid.value(2, 1), Some(10.0));
        assert_eq!(grid.value(4, 0), None);
    }

    #[test]
    fn test_clip_whole_grid() {
        let grid = make_test_grid();
        let window = grid.clip(&BoundingBox::new(0.0, 0.0, 50.0, 50.0)).unwrap();
        assert_eq!((window.width, window.height), (4, 4));
        assert_eq!(window.values, grid.values);
    }

    #[test]
    fn test_clip_selects_cell_centers() {
        let grid = make_test_grid();
        // Centers at lon 11.5 and 12.5, lat 22.5 and 21.5 → rows 1-2, cols 1-2
        let window = grid.clip(&BoundingBox::new(11.2, 21.2, 12.8, 22.8)).unwrap();
        assert_eq!((window.width, window.height), (2, 2));
        assert_eq!(window.values, vec![6.0, 7.0, 10.0, 11.0]);
    }

    #[test]
    fn test_clip_disjoint_is_none() {
        let grid = make_test_grid();
        assert!(grid.clip(&BoundingBox::new(50.0, 50.0, 51.0, 51.0)).is_none());
    }

    #[test]
    fn test_clip_without_cell_centers_is_empty() {
        let grid = make_test_grid();
        // Overlaps the grid but contains no cell center.
        let window = grid.clip(&BoundingBox::new(10.1, 20.1, 10.4, 20.4)).unwrap();
        assert!(window.is_empty());
    }

    #[test]
    fn test_valid_values_skip_nodata() {
        let grid = make_test_grid();
        let window = grid.clip(&BoundingBox::new(12.0, 20.0, 14.0, 22.0)).unwrap();
        assert_eq!(window.values, vec![11.0, 12.0, 15.0, -1.0]);
        let valid: Vec<f32> = window.valid_values().collect();
        assert_eq!(valid, vec![11.0, 12.0, 15.0]);
    }
}
