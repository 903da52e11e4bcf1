//! zone-prep: synthetic zone generator and collision pipeline driver.
//!
//! Usage:
//!   zone-prep synthetic --grid 2 --size 64 --seed 42 --output zones.zhf

use std::io::Write;
use std::path::PathBuf;
use std::process;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use zonefield_collision::{CollisionJobRunner, CollisionShapeSet};
use zonefield_core::TerrainConfig;
use zonefield_terrain::raster::{RasterFormat, RasterImage, Texel};
use zonefield_terrain::zones::{Zone, ZoneGrid};

/// .zhf magic bytes.
const ZHF_MAGIC: [u8; 4] = *b"ZNHF";

/// Current heightfield dump version.
const ZHF_VERSION: u16 = 1;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "synthetic" => cmd_synthetic(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "zone-prep: ZONEFIELD collision pipeline tool\n\
         \n\
         Commands:\n\
         \n\
         synthetic Generate a synthetic zone grid, run one stitching\n\
         pass, and print a JSON collision summary\n\
         \n\
           --grid <N>     N×N zones (default: 2)\n\
           --size <N>     samples per zone edge (default: 64)\n\
           --seed <N>     RNG seed (default: 42)\n\
           --factor <F>   height map factor (default: 50)\n\
           --output <path> write the stitched heightfields as a .zhf dump\n\
         \n\
         Examples:\n\
         \n\
           zone-prep synthetic --grid 3 --size 128 --seed 7\n\
           zone-prep synthetic --grid 2 --size 64 --output zones.zhf\n"
    );
}

fn parse_u64(args: &[String], flag: &str, default: u64) -> u64 {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            if let Ok(n) = args[i + 1].parse::<u64>() {
                return n;
            }
        }
    }
    default
}

fn parse_f32(args: &[String], flag: &str, default: f32) -> f32 {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            if let Ok(n) = args[i + 1].parse::<f32>() {
                return n;
            }
        }
    }
    default
}

fn parse_output(args: &[String]) -> Option<PathBuf> {
    for i in 0..args.len() {
        if args[i] == "--output" && i + 1 < args.len() {
            return Some(PathBuf::from(&args[i + 1]));
        }
    }
    None
}

fn cmd_synthetic(args: &[String]) {
    let grid_dim = parse_u64(args, "--grid", 2) as i32;
    let size = parse_u64(args, "--size", 64) as u32;
    let seed = parse_u64(args, "--seed", 42);
    let factor = parse_f32(args, "--factor", 50.0);
    let output = parse_output(args);

    let config = TerrainConfig {
        zones_size: size,
        height_map_factor: factor,
        water_factor: factor * 0.5,
        create_collision_in_thread: true,
        collision_only: true,
    };

    eprintln!("Generating {grid_dim}×{grid_dim} zones of {size}×{size} samples (seed {seed})...");
    let grid = generate_synthetic_zones(grid_dim, size, seed);

    let mut runner = CollisionJobRunner::new(config);
    let mut shapes = CollisionShapeSet::new(size);

    eprintln!("Running stitching pass...");
    if let Err(e) = runner.request_update(grid) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
    let delivered = match runner.drain_completed(&mut shapes) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    eprintln!("Delivered {delivered} zone heightfields");

    let summary = shapes.summary();
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing summary: {e}");
            process::exit(1);
        }
    }

    if let Some(path) = output {
        eprintln!("Writing .zhf to {}...", path.display());
        match write_zhf(&shapes, &path) {
            Ok(()) => {
                let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
                eprintln!("Done! Output: {} ({} bytes)", path.display(), file_size);
            }
            Err(e) => {
                eprintln!("Error writing .zhf: {e}");
                process::exit(1);
            }
        }
    }
}

/// Generate an N×N zone grid with rolling synthetic terrain.
///
/// Elevation is a smooth global function of world sample coordinates
/// plus seeded jitter, so neighboring zones roughly agree at their
/// borders and the stitching pass makes the seams exact. Low-lying
/// areas get a water raster; a few scattered pixels are holes.
fn generate_synthetic_zones(grid_dim: i32, size: u32, seed: u64) -> ZoneGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut zones = Vec::with_capacity((grid_dim * grid_dim) as usize);

    for zy in 0..grid_dim {
        for zx in 0..grid_dim {
            let count = (size as usize) * (size as usize);
            let mut elevation = Vec::with_capacity(count);
            let mut water = Vec::with_capacity(count);
            let mut has_water = false;

            for y in 0..size {
                for x in 0..size {
                    let wx = (zx * size as i32 + x as i32) as f32;
                    let wy = (zy * size as i32 + y as i32) as f32;

                    let rolling = 0.5
                        + 0.25 * (wx * 0.045).sin() * (wy * 0.03).cos()
                        + 0.15 * (wx * 0.011 + wy * 0.017).sin();
                    let jitter: f32 = rng.gen_range(-0.01..0.01);
                    let height = (rolling + jitter).clamp(0.0, 1.0);

                    let hole = if rng.gen_bool(0.002) { 1.0 } else { 0.0 };
                    elevation.push(Texel::new(height, hole));

                    // Flood everything below the water table.
                    let depth = (0.35 - height).max(0.0);
                    if depth > 0.0 {
                        has_water = true;
                    }
                    water.push(Texel::new(depth, 0.0));
                }
            }

            let elevation_image =
                RasterImage::from_texels(size, size, RasterFormat::Rg32F, &elevation);
            let water_image = has_water
                .then(|| RasterImage::from_texels(size, size, RasterFormat::R32F, &water));

            zones.push(Zone::new(IVec2::new(zx, zy), elevation_image, water_image));
        }
    }

    ZoneGrid::from_zones(size, zones)
}

/// Write the shape set as a .zhf dump: header, then per zone its grid
/// position and flat little-endian f32 heights (NaN = hole).
fn write_zhf(shapes: &CollisionShapeSet, path: &std::path::Path) -> std::io::Result<()> {
    let zones_size = shapes.zones_size();
    let mut positions: Vec<IVec2> = Vec::new();
    {
        let summary = shapes.summary();
        for zone in &summary.zones {
            positions.push(zone.position);
        }
    }

    let mut buf = Vec::with_capacity(
        16 + positions.len() * (8 + shapes.samples_per_zone() * 4),
    );
    buf.write_all(&ZHF_MAGIC)?;
    buf.write_all(&ZHF_VERSION.to_le_bytes())?;
    buf.write_all(&[0u8; 2])?; // reserved
    buf.write_all(&zones_size.to_le_bytes())?;
    buf.write_all(&(positions.len() as u32).to_le_bytes())?;

    for position in positions {
        let shape = shapes
            .shape_at(position)
            .expect("summary listed a missing shape");
        buf.write_all(&position.x.to_le_bytes())?;
        buf.write_all(&position.y.to_le_bytes())?;
        for &h in shape.heights() {
            buf.write_all(&h.to_le_bytes())?;
        }
    }

    std::fs::write(path, buf)
}
