//! ESRI ASCII grid parser.
//!
//! An ASCII grid is a short `key value` header followed by whitespace
//! separated cell values, row by row from the north edge:
//!
//! ```text
//! ncols        4
//! nrows        3
//! xllcorner    76.0
//! yllcorner    9.5
//! cellsize     0.25
//! NODATA_value -9999
//! 1 2 3 4
//! ...
//! ```
//!
//! `xllcenter`/`yllcenter` may replace the corner keys, in which case the
//! origin is shifted by half a cell.

use std::path::Path;

use crate::error::RasterError;
use crate::grid::{RasterGrid, RasterHeader};
use crate::projection::Crs;

/// Header keys recognised before the cell values begin.
const HEADER_KEYS: [&str; 8] = [
    "ncols",
    "nrows",
    "xllcorner",
    "yllcorner",
    "xllcenter",
    "yllcenter",
    "cellsize",
    "nodata_value",
];

#[derive(Default)]
struct AscHeader {
    ncols: Option<u32>,
    nrows: Option<u32>,
    xll: Option<(f64, bool)>,
    yll: Option<(f64, bool)>,
    cellsize: Option<f64>,
    nodata: Option<f64>,
}

/// Parse ASCII grid text into a raster in the given CRS.
pub fn parse_asc(text: &str, crs: Crs) -> Result<RasterGrid, RasterError> {
    let mut header = AscHeader::default();
    let mut tokens = text.split_whitespace().peekable();

    while let Some(&token) = tokens.peek() {
        let key = token.to_ascii_lowercase();
        if !HEADER_KEYS.contains(&key.as_str()) {
            break;
        }
        tokens.next();
        let raw = tokens
            .next()
            .ok_or_else(|| RasterError::invalid(format!("missing value for header key {key}")))?;

        match key.as_str() {
            "ncols" => header.ncols = Some(parse_number(&key, raw)?),
            "nrows" => header.nrows = Some(parse_number(&key, raw)?),
            "xllcorner" => header.xll = Some((parse_number(&key, raw)?, false)),
            "xllcenter" => header.xll = Some((parse_number(&key, raw)?, true)),
            "yllcorner" => header.yll = Some((parse_number(&key, raw)?, false)),
            "yllcenter" => header.yll = Some((parse_number(&key, raw)?, true)),
            "cellsize" => header.cellsize = Some(parse_number(&key, raw)?),
            _ => header.nodata = Some(parse_number(&key, raw)?),
        }
    }

    let width = header.ncols.ok_or_else(|| missing("ncols"))?;
    let height = header.nrows.ok_or_else(|| missing("nrows"))?;
    let cell_size = header.cellsize.ok_or_else(|| missing("cellsize"))?;
    let (xll, x_is_center) = header.xll.ok_or_else(|| missing("xllcorner"))?;
    let (yll, y_is_center) = header.yll.ok_or_else(|| missing("yllcorner"))?;

    let origin_x = if x_is_center { xll - cell_size / 2.0 } else { xll };
    let origin_y = if y_is_center { yll - cell_size / 2.0 } else { yll };

    let values = tokens
        .map(|raw| {
            raw.parse::<f32>()
                .map_err(|_| RasterError::invalid(format!("invalid cell value: {raw}")))
        })
        .collect::<Result<Vec<f32>, _>>()?;

    RasterGrid::new(
        RasterHeader {
            crs,
            origin_x,
            origin_y,
            cell_size,
            width,
            height,
            nodata: header.nodata,
        },
        values,
    )
}

/// Load an ASCII grid file.
pub fn load_asc(path: &Path, crs: Crs) -> Result<RasterGrid, RasterError> {
    let text = std::fs::read_to_string(path)?;
    parse_asc(&text, crs)
}

/// Render a raster as ASCII grid text.
pub fn to_asc_string(grid: &RasterGrid) -> String {
    let h = &grid.header;
    let mut out = format!(
        "ncols {}\nnrows {}\nxllcorner {}\nyllcorner {}\ncellsize {}\n",
        h.width, h.height, h.origin_x, h.origin_y, h.cell_size
    );
    if let Some(nodata) = h.nodata {
        out.push_str(&format!("NODATA_value {nodata}\n"));
    }
    for row in grid.values.chunks(h.width.max(1) as usize) {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, RasterError> {
    raw.parse()
        .map_err(|_| RasterError::invalid(format!("invalid value for {key}: {raw}")))
}

fn missing(key: &str) -> RasterError {
    RasterError::invalid(format!("missing header key {key}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "ncols 3\n\
                          nrows 2\n\
                          xllcorner 76.0\n\
                          yllcorner 9.5\n\
                          cellsize 0.5\n\
                          NODATA_value -9999\n\
                          1 2 -9999\n\
                          4.5 5 6\n";

    #[test]
    fn test_parse_header_and_values() {
        let grid = parse_asc(SAMPLE, Crs::Wgs84).unwrap();
        let h = &grid.header;
        assert_eq!((h.width, h.height), (3, 2));
        assert_eq!(h.origin_x, 76.0);
        assert_eq!(h.origin_y, 9.5);
        assert_eq!(h.cell_size, 0.5);
        assert_eq!(h.nodata, Some(-9999.0));
        assert_eq!(grid.values, vec![1.0, 2.0, -9999.0, 4.5, 5.0, 6.0]);
        assert_eq!(h.north(), 10.5);
    }

    #[test]
    fn test_center_registered_origin() {
        let text = "NCOLS 1\nNROWS 1\nXLLCENTER 10.5\nYLLCENTER 20.5\nCELLSIZE 1\n7\n";
        let grid = parse_asc(text, Crs::Wgs84).unwrap();
        assert_eq!(grid.header.origin_x, 10.0);
        assert_eq!(grid.header.origin_y, 20.0);
        assert_eq!(grid.header.nodata, None);
    }

    #[test]
    fn test_value_count_mismatch() {
        let text = "ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 1\n1 2 3\n";
        assert!(parse_asc(text, Crs::Wgs84).is_err());
    }

    #[test]
    fn test_missing_header_key() {
        let text = "ncols 1\nnrows 1\nxllcorner 0\ncellsize 1\n1\n";
        let err = parse_asc(text, Crs::Wgs84).unwrap_err();
        assert!(err.to_string().contains("yllcorner"));
    }

    #[test]
    fn test_asc_text_roundtrip() {
        let grid = parse_asc(SAMPLE, Crs::Wgs84).unwrap();
        let again = parse_asc(&to_asc_string(&grid), Crs::Wgs84).unwrap();
        assert_eq!(grid, again);
    }
}
