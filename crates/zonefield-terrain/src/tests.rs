//! Cross-module stitching scenarios.

use std::sync::atomic::AtomicBool;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use zonefield_core::config::TerrainConfig;

use crate::builder::{build_heightfields, BuildOutcome, ZoneHeightfield};
use crate::raster::{RasterFormat, RasterImage, Texel};
use crate::zones::{Zone, ZoneGrid};

fn completed(outcome: BuildOutcome) -> Vec<ZoneHeightfield> {
    match outcome {
        BuildOutcome::Completed(fields) => fields,
        BuildOutcome::Cancelled => panic!("pass was unexpectedly cancelled"),
    }
}

/// Random zone with occasional holes and a water raster on demand.
fn random_zone(rng: &mut ChaCha8Rng, position: IVec2, size: u32, with_water: bool) -> Zone {
    let count = (size as usize) * (size as usize);
    let mut texels = Vec::with_capacity(count);
    for _ in 0..count {
        let hole = if rng.gen_bool(0.05) { 1.0 } else { 0.0 };
        texels.push(Texel::new(rng.gen_range(0.0..1.0), hole));
    }
    let elevation = RasterImage::from_texels(size, size, RasterFormat::Rg32F, &texels);

    let water = if with_water {
        let depths: Vec<Texel> = (0..count)
            .map(|_| Texel::new(rng.gen_range(0.0..0.3), 0.0))
            .collect();
        Some(RasterImage::from_texels(size, size, RasterFormat::R32F, &depths))
    } else {
        None
    };

    Zone::new(position, elevation, water)
}

fn random_grid(seed: u64, size: u32) -> ZoneGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut zones = Vec::new();
    for y in 0..3 {
        for x in 0..3 {
            let with_water = rng.gen_bool(0.5);
            zones.push(random_zone(&mut rng, IVec2::new(x, y), size, with_water));
        }
    }
    ZoneGrid::from_zones(size, zones)
}

#[test]
fn test_idempotent_over_unchanged_snapshot() {
    let grid = random_grid(42, 8);
    let config = TerrainConfig {
        zones_size: 8,
        height_map_factor: 25.0,
        water_factor: 3.0,
        ..Default::default()
    };
    let cancel = AtomicBool::new(false);

    let first = completed(build_heightfields(&grid, &config, &cancel).unwrap());
    let second = completed(build_heightfields(&grid, &config, &cancel).unwrap());

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.heights.len(), b.heights.len());
        // Bit-identical, including NaN payloads.
        for (i, (ha, hb)) in a.heights.iter().zip(&b.heights).enumerate() {
            assert_eq!(
                ha.to_bits(),
                hb.to_bits(),
                "zone {:?} pixel {i} differs between passes",
                a.position
            );
        }
    }
}

#[test]
fn test_corner_of_2x2_grid_stitches_left_not_top() {
    // Zone (1, 1) of a 2×2 grid has both a left and a top neighbor.
    // Its (0, 0) pixel must come from the left neighbor's last
    // column, never the top neighbor.
    let size = 4;
    let zone = |x: i32, y: i32, height: f32| {
        Zone::new(
            IVec2::new(x, y),
            RasterImage::filled(size, size, RasterFormat::Rg32F, Texel::new(height, 0.0)),
            None,
        )
    };
    let grid = ZoneGrid::from_zones(
        size,
        [
            zone(0, 0, 0.1),
            zone(1, 0, 0.2),
            zone(0, 1, 0.3),
            zone(1, 1, 0.4),
        ],
    );
    let config = TerrainConfig {
        zones_size: size,
        height_map_factor: 10.0,
        water_factor: 0.0,
        ..Default::default()
    };
    let cancel = AtomicBool::new(false);

    let fields = completed(build_heightfields(&grid, &config, &cancel).unwrap());
    let corner_zone = &fields[3];
    assert_eq!(corner_zone.position, IVec2::new(1, 1));
    // Left neighbor (0, 1) is 0.3 → 3.0; top neighbor (1, 0) would
    // give 2.0.
    assert_eq!(corner_zone.heights[0], 3.0);
}

#[test]
fn test_all_zone_arrays_have_declared_length() {
    let grid = random_grid(7, 8);
    let config = TerrainConfig {
        zones_size: 8,
        ..Default::default()
    };
    let cancel = AtomicBool::new(false);

    let fields = completed(build_heightfields(&grid, &config, &cancel).unwrap());
    assert_eq!(fields.len(), 9);
    for field in &fields {
        assert_eq!(field.heights.len(), 64);
    }
}
