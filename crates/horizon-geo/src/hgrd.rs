//! .hgrd binary raster format loader and writer.
//!
//! Compact single-band format for fast loading of preprocessed population
//! and land-cover rasters. Layout (all little-endian):
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 4 | magic `HGRD` |
//! | 4 | 2 | version |
//! | 6 | 2 | flags (bit 0: nodata present) |
//! | 8 | 4 | EPSG code |
//! | 12 | 8 | origin_x (west edge) |
//! | 20 | 8 | origin_y (south edge) |
//! | 28 | 8 | cell size |
//! | 36 | 4 | width |
//! | 40 | 4 | height |
//! | 44 | 8 | nodata value |
//! | 52 | 12 | reserved |
//! | 64 | 4·w·h | f32 cell values, row-major from the north edge |

use std::path::Path;

use crate::error::RasterError;
use crate::grid::{RasterGrid, RasterHeader};
use crate::projection::Crs;

/// .hgrd magic bytes.
const HGRD_MAGIC: [u8; 4] = *b"HGRD";

/// Current format version.
const HGRD_VERSION: u16 = 1;

/// Header flag: nodata sentinel present.
const FLAG_HAS_NODATA: u16 = 0x0001;

/// Total header size in bytes.
const HEADER_SIZE: usize = 64;

/// Load a RasterGrid from a .hgrd file.
pub fn load_hgrd(path: &Path) -> Result<RasterGrid, RasterError> {
    let data = std::fs::read(path)?;
    parse_hgrd(&data)
}

/// Parse a .hgrd from a byte buffer.
pub fn parse_hgrd(data: &[u8]) -> Result<RasterGrid, RasterError> {
    if data.len() < HEADER_SIZE {
        return Err(RasterError::invalid("file too small for .hgrd header"));
    }
    if data[0..4] != HGRD_MAGIC {
        return Err(RasterError::invalid("invalid .hgrd magic bytes"));
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if version != HGRD_VERSION {
        return Err(RasterError::invalid(format!(
            "unsupported .hgrd version: {version}"
        )));
    }

    let flags = u16::from_le_bytes([data[6], data[7]]);
    let crs = Crs::from_epsg(read_u32(data, 8))?;
    let origin_x = read_f64(data, 12);
    let origin_y = read_f64(data, 20);
    let cell_size = read_f64(data, 28);
    let width = read_u32(data, 36);
    let height = read_u32(data, 40);
    let nodata = (flags & FLAG_HAS_NODATA != 0).then(|| read_f64(data, 44));
    // Bytes 52..64 are reserved

    let cell_count = width as usize * height as usize;
    let values_end = cell_count
        .checked_mul(4)
        .and_then(|n| n.checked_add(HEADER_SIZE))
        .ok_or_else(|| RasterError::invalid("raster dimensions overflow"))?;
    if data.len() < values_end {
        return Err(RasterError::invalid("file too small for cell data"));
    }

    let values = data[HEADER_SIZE..values_end]
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    RasterGrid::new(
        RasterHeader {
            crs,
            origin_x,
            origin_y,
            cell_size,
            width,
            height,
            nodata,
        },
        values,
    )
}

/// Write a RasterGrid to a .hgrd file.
pub fn write_hgrd(grid: &RasterGrid, path: &Path) -> Result<(), RasterError> {
    std::fs::write(path, serialize_hgrd(grid))?;
    Ok(())
}

/// Serialize a RasterGrid to .hgrd bytes.
pub fn serialize_hgrd(grid: &RasterGrid) -> Vec<u8> {
    let h = &grid.header;
    let flags = if h.nodata.is_some() { FLAG_HAS_NODATA } else { 0 };

    let mut buf = Vec::with_capacity(HEADER_SIZE + grid.values.len() * 4);
    buf.extend_from_slice(&HGRD_MAGIC);
    buf.extend_from_slice(&HGRD_VERSION.to_le_bytes());
    buf.extend_from_slice(&flags.to_le_bytes());
    buf.extend_from_slice(&h.crs.epsg().to_le_bytes());
    buf.extend_from_slice(&h.origin_x.to_le_bytes());
    buf.extend_from_slice(&h.origin_y.to_le_bytes());
    buf.extend_from_slice(&h.cell_size.to_le_bytes());
    buf.extend_from_slice(&h.width.to_le_bytes());
    buf.extend_from_slice(&h.height.to_le_bytes());
    buf.extend_from_slice(&h.nodata.unwrap_or(0.0).to_le_bytes());
    buf.resize(HEADER_SIZE, 0);

    for value in &grid.values {
        buf.extend_from_slice(&value.to_le_bytes());
    }
    buf
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

fn read_f64(data: &[u8], offset: usize) -> f64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[offset..offset + 8]);
    f64::from_le_bytes(bytes)
}
