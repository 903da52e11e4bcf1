//! The heightfield stitching pass.
//!
//! For every zone, for every pixel in raster scan order, resolve the
//! providing zone/pixel, derive the collision height, and assemble a
//! flat row-major array per zone. The pass is cooperatively
//! cancellable: the flag is polled before each pixel and after each
//! zone, and a cancelled pass discards all partial output.

use std::sync::atomic::{AtomicBool, Ordering};

use glam::IVec2;

use zonefield_core::config::TerrainConfig;
use zonefield_core::constants::HOLE_SENTINEL;
use zonefield_core::error::TerrainError;

use crate::neighbor::resolve_source;
use crate::sample_cache::HeightSampleCache;
use crate::zones::ZoneGrid;

/// Stitched collision heights for one zone: `zones_size²` f32 values,
/// row-major, `HOLE_SENTINEL` where the surface has a hole.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneHeightfield {
    pub zone_index: usize,
    pub position: IVec2,
    pub heights: Vec<f32>,
}

/// Result of a stitching pass.
#[derive(Debug)]
pub enum BuildOutcome {
    /// One heightfield per zone, in grid order.
    Completed(Vec<ZoneHeightfield>),
    /// The cancellation flag was observed; partial output was
    /// discarded and nothing may be delivered.
    Cancelled,
}

/// Run one stitching pass over a zone grid snapshot.
///
/// Validates the snapshot first: any raster dimension mismatch fails
/// the whole pass with no partial results. Cancellation is not an
/// error and reports `BuildOutcome::Cancelled`.
pub fn build_heightfields(
    grid: &ZoneGrid,
    config: &TerrainConfig,
    cancel: &AtomicBool,
) -> Result<BuildOutcome, TerrainError> {
    grid.validate()?;

    let size = grid.zones_size();
    let mut cache = HeightSampleCache::new();
    let mut heightfields = Vec::with_capacity(grid.len());

    for zone_index in 0..grid.len() {
        let position = grid.zones()[zone_index].position;
        let mut heights = Vec::with_capacity((size as usize) * (size as usize));

        for y in 0..size {
            for x in 0..size {
                if cancel.load(Ordering::Relaxed) {
                    return Ok(BuildOutcome::Cancelled);
                }

                let source = resolve_source(grid, zone_index, x, y);
                let (elevation, water) =
                    cache.sample(grid, source.zone_index, source.x, source.y)?;

                if elevation.g > 0.0 {
                    heights.push(HOLE_SENTINEL);
                } else {
                    let water_depth = water.unwrap_or(0.0);
                    heights.push(
                        elevation.r * config.height_map_factor - water_depth * config.water_factor,
                    );
                }
            }
        }

        if cancel.load(Ordering::Relaxed) {
            return Ok(BuildOutcome::Cancelled);
        }
        heightfields.push(ZoneHeightfield {
            zone_index,
            position,
            heights,
        });
    }

    Ok(BuildOutcome::Completed(heightfields))
}
