//! Terrain zones and the zone grid.
//!
//! A `Zone` is one square tile of the terrain, identified by its
//! integer grid position and holding its own elevation and (optional)
//! water rasters. The `ZoneGrid` is the authoritative ordered zone
//! collection; it clones cheaply so a generation job can capture a
//! snapshot and never read a live, mutating collection.

use std::collections::HashMap;
use std::sync::Arc;

use glam::IVec2;

use zonefield_core::error::TerrainError;

use crate::raster::RasterImage;

/// One terrain zone. Read-only during a stitching pass.
#[derive(Debug, Clone)]
pub struct Zone {
    /// Grid position, unique within the grid.
    pub position: IVec2,
    /// Elevation raster: red = height sample, green = hole flag.
    pub elevation: Arc<RasterImage>,
    /// Water raster: red = water depth. Absent means no water anywhere.
    pub water: Option<Arc<RasterImage>>,
}

impl Zone {
    pub fn new(position: IVec2, elevation: RasterImage, water: Option<RasterImage>) -> Self {
        Self {
            position,
            elevation: Arc::new(elevation),
            water: water.map(Arc::new),
        }
    }
}

/// The ordered collection of zones making up the terrain tiling.
#[derive(Debug, Clone)]
pub struct ZoneGrid {
    zones_size: u32,
    zones: Vec<Zone>,
    index: HashMap<IVec2, usize>,
}

impl ZoneGrid {
    /// Empty grid for the given zone edge length in samples.
    pub fn new(zones_size: u32) -> Self {
        Self {
            zones_size,
            zones: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a grid from an ordered zone list. A later zone at an
    /// already-present position replaces the earlier one, matching
    /// zone resource reassignment.
    pub fn from_zones(zones_size: u32, zones: impl IntoIterator<Item = Zone>) -> Self {
        let mut grid = Self::new(zones_size);
        for zone in zones {
            grid.insert(zone);
        }
        grid
    }

    /// Insert a zone, replacing any existing zone at the same position.
    pub fn insert(&mut self, zone: Zone) {
        match self.index.get(&zone.position) {
            Some(&existing) => self.zones[existing] = zone,
            None => {
                self.index.insert(zone.position, self.zones.len());
                self.zones.push(zone);
            }
        }
    }

    /// Zone edge length in samples.
    pub fn zones_size(&self) -> u32 {
        self.zones_size
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// All zones in insertion order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Zone by ordinal index.
    pub fn zone(&self, index: usize) -> Option<&Zone> {
        self.zones.get(index)
    }

    /// Ordinal index of the zone at a grid position, if present.
    pub fn zone_index_at(&self, position: IVec2) -> Option<usize> {
        self.index.get(&position).copied()
    }

    /// Check every zone raster against the configured zone size and
    /// its own declared payload length.
    ///
    /// Any mismatch fails the whole pass: partial collision geometry
    /// is worse than none.
    pub fn validate(&self) -> Result<(), TerrainError> {
        let expected = self.zones_size;
        for zone in &self.zones {
            for raster in std::iter::once(&zone.elevation).chain(zone.water.as_ref()) {
                if raster.width() != expected || raster.height() != expected {
                    return Err(TerrainError::RasterSizeMismatch {
                        zone: zone.position,
                        expected,
                        width: raster.width(),
                        height: raster.height(),
                    });
                }
                if raster.payload_bytes() != raster.expected_payload_bytes() {
                    return Err(TerrainError::MalformedRaster {
                        zone: zone.position,
                        expected_bytes: raster.expected_payload_bytes(),
                        actual_bytes: raster.payload_bytes(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{RasterFormat, Texel};

    fn flat_zone(x: i32, y: i32, size: u32, height: f32) -> Zone {
        Zone::new(
            IVec2::new(x, y),
            RasterImage::filled(size, size, RasterFormat::Rg32F, Texel::new(height, 0.0)),
            None,
        )
    }

    #[test]
    fn test_insert_and_lookup() {
        let grid = ZoneGrid::from_zones(4, [flat_zone(0, 0, 4, 1.0), flat_zone(1, 0, 4, 2.0)]);

        assert_eq!(grid.len(), 2);
        assert_eq!(grid.zone_index_at(IVec2::new(0, 0)), Some(0));
        assert_eq!(grid.zone_index_at(IVec2::new(1, 0)), Some(1));
        assert_eq!(grid.zone_index_at(IVec2::new(0, 1)), None);
    }

    #[test]
    fn test_insert_replaces_same_position() {
        let mut grid = ZoneGrid::new(4);
        grid.insert(flat_zone(0, 0, 4, 1.0));
        grid.insert(flat_zone(0, 0, 4, 7.0));

        assert_eq!(grid.len(), 1);
        let zone = grid.zone(0).unwrap();
        let raster = zone.elevation.decode(zone.position).unwrap();
        assert_eq!(raster.texel(0, 0).r, 7.0);
    }

    #[test]
    fn test_validate_accepts_matching_dimensions() {
        let grid = ZoneGrid::from_zones(4, [flat_zone(0, 0, 4, 0.5)]);
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_undersized_raster() {
        let grid = ZoneGrid::from_zones(4, [flat_zone(2, 3, 3, 0.5)]);
        let err = grid.validate().unwrap_err();
        assert_eq!(
            err,
            TerrainError::RasterSizeMismatch {
                zone: IVec2::new(2, 3),
                expected: 4,
                width: 3,
                height: 3,
            }
        );
    }

    #[test]
    fn test_validate_checks_water_raster_too() {
        let zone = Zone::new(
            IVec2::ZERO,
            RasterImage::filled(4, 4, RasterFormat::Rg32F, Texel::default()),
            Some(RasterImage::filled(2, 2, RasterFormat::R32F, Texel::default())),
        );
        let grid = ZoneGrid::from_zones(4, [zone]);
        assert!(grid.validate().is_err());
    }

    #[test]
    fn test_snapshot_is_independent_of_later_inserts() {
        let mut grid = ZoneGrid::new(4);
        grid.insert(flat_zone(0, 0, 4, 1.0));

        let snapshot = grid.clone();
        grid.insert(flat_zone(1, 0, 4, 2.0));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(grid.len(), 2);
    }
}
