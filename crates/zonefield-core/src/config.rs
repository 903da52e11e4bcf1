//! Terrain pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HEIGHT_MAP_FACTOR, DEFAULT_WATER_FACTOR, DEFAULT_ZONES_SIZE};

/// Configuration for the heightfield stitching pipeline.
///
/// All knobs are explicit values threaded into the pipeline entry
/// point; there is no module-level mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Zone edge length in samples. Every zone raster must be exactly
    /// `zones_size × zones_size`.
    pub zones_size: u32,
    /// Scale applied to raw elevation samples.
    pub height_map_factor: f32,
    /// Scale applied to water depth subtracted from the surface.
    pub water_factor: f32,
    /// When true, generation runs synchronously in the caller's thread
    /// instead of on a background worker.
    pub create_collision_in_thread: bool,
    /// When true, the pipeline produces collision data only and skips
    /// shader-facing texture work.
    pub collision_only: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            zones_size: DEFAULT_ZONES_SIZE,
            height_map_factor: DEFAULT_HEIGHT_MAP_FACTOR,
            water_factor: DEFAULT_WATER_FACTOR,
            create_collision_in_thread: false,
            collision_only: false,
        }
    }
}

impl TerrainConfig {
    /// Total sample count of one zone heightfield.
    pub fn samples_per_zone(&self) -> usize {
        (self.zones_size as usize) * (self.zones_size as usize)
    }
}
