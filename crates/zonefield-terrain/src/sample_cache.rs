//! Per-pass decoded raster cache.
//!
//! Stitching makes many rows of one zone read from the same neighbor,
//! so each generation pass decodes every touched zone's rasters at
//! most once. The cache lives exactly as long as one pass and is
//! dropped wholesale with it.

use std::collections::HashMap;

use zonefield_core::error::TerrainError;

use crate::raster::{Raster, Texel};
use crate::zones::ZoneGrid;

/// Decoded rasters for one zone.
#[derive(Debug)]
struct ZoneSamples {
    elevation: Raster,
    water: Option<Raster>,
}

/// Memo of decoded zone rasters, keyed by zone index, scoped to one
/// generation pass.
#[derive(Debug, Default)]
pub struct HeightSampleCache {
    decoded: HashMap<usize, ZoneSamples>,
}

impl HeightSampleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elevation texel and water depth (if any) at `(x, y)` of the
    /// zone at `zone_index`, decoding that zone's rasters on first
    /// touch.
    pub fn sample(
        &mut self,
        grid: &ZoneGrid,
        zone_index: usize,
        x: u32,
        y: u32,
    ) -> Result<(Texel, Option<f32>), TerrainError> {
        if !self.decoded.contains_key(&zone_index) {
            let zone = grid
                .zone(zone_index)
                .ok_or(TerrainError::MissingZone { index: zone_index })?;
            let elevation = zone.elevation.decode(zone.position)?;
            let water = match &zone.water {
                Some(image) => Some(image.decode(zone.position)?),
                None => None,
            };
            self.decoded.insert(zone_index, ZoneSamples { elevation, water });
        }

        let samples = &self.decoded[&zone_index];
        let elevation = samples.elevation.texel(x, y);
        let water = samples.water.as_ref().map(|w| w.texel(x, y).r);
        Ok((elevation, water))
    }

    /// Number of zones decoded so far in this pass.
    pub fn decoded_zone_count(&self) -> usize {
        self.decoded.len()
    }
}
