//! raster-prep: ASCII grid → .hgrd conversion, raster inspection, and
//! synthetic exposure rasters for demos and tests.
//!
//! Usage:
//!   raster-prep convert --asc population.asc --output data/population.hgrd
//!   raster-prep info data/population.hgrd
//!   raster-prep synthetic --kind land-cover --center 19.07,72.88 --output data/land_cover.hgrd

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use horizon_core::types::GeoPoint;
use horizon_geo::asc::load_asc;
use horizon_geo::hgrd::write_hgrd;
use horizon_geo::{load_raster, Crs, RasterError, RasterGrid, RasterHeader};

/// Nodata sentinel written into synthetic rasters.
const SYNTHETIC_NODATA: f64 = -9999.0;

#[derive(Parser, Debug)]
#[command(name = "raster-prep")]
#[command(version, about = "ImpactHorizon raster preprocessing tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an ESRI ASCII grid to .hgrd
    Convert {
        /// ASCII grid to convert
        #[arg(long)]
        asc: PathBuf,
        /// EPSG code of the grid coordinates (4326 or 3857)
        #[arg(long, default_value_t = 4326)]
        crs: u32,
        /// Output .hgrd path
        #[arg(long)]
        output: PathBuf,
    },
    /// Print header and value statistics of a raster
    Info {
        path: PathBuf,
    },
    /// Generate a synthetic raster around a city center
    Synthetic {
        #[arg(long, value_enum)]
        kind: SyntheticKind,
        /// City center as lat,lon
        #[arg(long, value_parser = parse_center, default_value = "19.076,72.8777")]
        center: GeoPoint,
        /// Grid size in cells per side
        #[arg(long, default_value_t = 200)]
        size: u32,
        /// Grid extent in degrees per side
        #[arg(long, default_value_t = 2.0)]
        span_deg: f64,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SyntheticKind {
    /// People per cell
    Population,
    /// Land-cover class codes
    LandCover,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Convert { asc, crs, output } => cmd_convert(&asc, crs, &output),
        Command::Info { path } => cmd_info(&path),
        Command::Synthetic {
            kind,
            center,
            size,
            span_deg,
            seed,
            output,
        } => cmd_synthetic(kind, center, size, span_deg, seed, &output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn parse_center(raw: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected lat,lon, got {raw}"))?;
    let lat: f64 = lat.trim().parse().map_err(|_| format!("invalid latitude: {lat}"))?;
    let lon: f64 = lon.trim().parse().map_err(|_| format!("invalid longitude: {lon}"))?;
    let point = GeoPoint::new(lat, lon);
    point.validate().map_err(|e| e.to_string())?;
    Ok(point)
}

// --- Convert command ---

fn cmd_convert(asc: &Path, epsg: u32, output: &Path) -> Result<(), RasterError> {
    let crs = Crs::from_epsg(epsg)?;
    eprintln!("Loading {} as EPSG:{}...", asc.display(), crs.epsg());
    let grid = load_asc(asc, crs)?;
    describe(&grid);
    write_output(&grid, output)
}

// --- Info command ---

fn cmd_info(path: &Path) -> Result<(), RasterError> {
    let grid = load_raster(path)?;
    println!("{}", path.display());
    describe(&grid);
    Ok(())
}

fn describe(grid: &RasterGrid) {
    let h = &grid.header;
    let bounds = grid.bounds();
    let stats = ValueStats::collect(grid);
    eprintln!(
        "  {}×{} cells, cell size {} (EPSG:{})",
        h.width,
        h.height,
        h.cell_size,
        h.crs.epsg()
    );
    eprintln!(
        "  bounds W {} S {} E {} N {}",
        bounds.west, bounds.south, bounds.east, bounds.north
    );
    match h.nodata {
        Some(nodata) => eprintln!("  nodata {nodata} ({} cells)", stats.nodata),
        None => eprintln!("  no nodata sentinel"),
    }
    if stats.valid > 0 {
        eprintln!(
            "  values {}..{}, sum {:.0} over {} valid cells",
            stats.min, stats.max, stats.sum, stats.valid
        );
    }
}

/// Summary of a raster's cell values.
#[derive(Debug, Default, PartialEq)]
struct ValueStats {
    valid: usize,
    nodata: usize,
    min: f32,
    max: f32,
    sum: f64,
}

impl ValueStats {
    fn collect(grid: &RasterGrid) -> Self {
        let nodata = grid.header.nodata.map(|nd| nd as f32);
        let mut stats = ValueStats {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
            ..ValueStats::default()
        };
        for &value in &grid.values {
            if Some(value) == nodata || !value.is_finite() {
                stats.nodata += 1;
                continue;
            }
            stats.valid += 1;
            stats.min = stats.min.min(value);
            stats.max = stats.max.max(value);
            stats.sum += f64::from(value);
        }
        stats
    }
}

// --- Synthetic command ---

fn cmd_synthetic(
    kind: SyntheticKind,
    center: GeoPoint,
    size: u32,
    span_deg: f64,
    seed: u64,
    output: &Path,
) -> Result<(), RasterError> {
    eprintln!("Generating {size}×{size} synthetic {kind:?} raster (seed {seed})...");
    eprintln!("City center: {}°N, {}°E", center.lat, center.lon);
    let grid = generate_synthetic(kind, center, size, span_deg, seed)?;
    describe(&grid);
    write_output(&grid, output)
}

fn write_output(grid: &RasterGrid, output: &Path) -> Result<(), RasterError> {
    eprintln!("Writing .hgrd to {}...", output.display());
    write_hgrd(grid, output)?;
    let file_size = std::fs::metadata(output).map(|m| m.len()).unwrap_or(0);
    eprintln!("Done! Output: {} ({} bytes)", output.display(), file_size);
    Ok(())
}

/// Generate a geographic raster of a coastal city centered on `center`.
///
/// The city core sits at the center with density falling off with distance.
/// The western edge of the grid is sea (nodata). Same seed, same raster.
fn generate_synthetic(
    kind: SyntheticKind,
    center: GeoPoint,
    size: u32,
    span_deg: f64,
    seed: u64,
) -> Result<RasterGrid, RasterError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let size = size.max(1);
    let cell_size = span_deg / size as f64;

    let mut values = Vec::with_capacity(size as usize * size as usize);
    for row in 0..size {
        for col in 0..size {
            // Normalized offsets from center (-1..1); ny grows northwards
            let nx = (col as f64 + 0.5) / size as f64 * 2.0 - 1.0;
            let ny = 1.0 - (row as f64 + 0.5) / size as f64 * 2.0;
            let r = (nx * nx + ny * ny).sqrt();

            let coast = -0.55 + 0.08 * (ny * 9.0).sin();
            if nx < coast {
                values.push(SYNTHETIC_NODATA as f32);
                continue;
            }

            let jitter: f64 = rng.gen_range(0.0..1.0);
            let value = match kind {
                SyntheticKind::Population => synthetic_population(r, jitter),
                SyntheticKind::LandCover => synthetic_land_class(r, jitter),
            };
            values.push(value);
        }
    }

    RasterGrid::new(
        RasterHeader {
            crs: Crs::Wgs84,
            origin_x: center.lon - span_deg / 2.0,
            origin_y: center.lat - span_deg / 2.0,
            cell_size,
            width: size,
            height: size,
            nodata: Some(SYNTHETIC_NODATA),
        },
        values,
    )
}

/// People per cell: dense core with exponential falloff and noise.
fn synthetic_population(r: f64, jitter: f64) -> f32 {
    let core = 25_000.0 * (-r * 6.0).exp();
    let suburbs = 1_500.0 * (-r * 2.0).exp();
    ((core + suburbs) * (0.6 + 0.8 * jitter)).round() as f32
}

/// Land-cover class code: built core, then crops, then trees and rangeland.
fn synthetic_land_class(r: f64, jitter: f64) -> f32 {
    let r = r + 0.1 * (jitter - 0.5);
    let class = if r < 0.25 {
        8
    } else if r < 0.45 {
        if jitter < 0.7 {
            8
        } else {
            5
        }
    } else if r < 0.7 {
        5
    } else if jitter < 0.5 {
        2
    } else {
        11
    };
    class as f32
}
