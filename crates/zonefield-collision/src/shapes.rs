//! Collision-shape ownership.
//!
//! The shape set lives on a single designated thread; heightfields
//! reach it only via `CollisionJobRunner::drain_completed` on that
//! thread. A delivered array supersedes the previous one for its
//! zone, it never mutates it in place.

use std::collections::HashMap;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use zonefield_core::error::TerrainError;

/// Sink for stitched per-zone heightfields.
///
/// Implementations must reject arrays whose length does not match the
/// declared `zones_size²` sample count.
pub trait HeightfieldSink {
    fn accept_heightfield(
        &mut self,
        zone_index: usize,
        position: IVec2,
        heights: Vec<f32>,
    ) -> Result<(), TerrainError>;
}

/// One zone's collision heightfield as last delivered.
#[derive(Debug, Clone)]
pub struct CollisionShape {
    pub position: IVec2,
    heights: Vec<f32>,
}

impl CollisionShape {
    /// Flat row-major heights; NaN entries mean "no surface".
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Whether the pixel has a collision surface (not a hole).
    pub fn has_surface_at(&self, x: u32, y: u32, zones_size: u32) -> bool {
        let idx = (y as usize) * (zones_size as usize) + (x as usize);
        self.heights.get(idx).is_some_and(|h| !h.is_nan())
    }
}

/// The collision-shape owner: latest accepted heightfield per zone
/// position.
#[derive(Debug)]
pub struct CollisionShapeSet {
    zones_size: u32,
    shapes: HashMap<IVec2, CollisionShape>,
}

impl CollisionShapeSet {
    pub fn new(zones_size: u32) -> Self {
        Self {
            zones_size,
            shapes: HashMap::new(),
        }
    }

    pub fn zones_size(&self) -> u32 {
        self.zones_size
    }

    /// Sample count every accepted array must have.
    pub fn samples_per_zone(&self) -> usize {
        (self.zones_size as usize) * (self.zones_size as usize)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shape_at(&self, position: IVec2) -> Option<&CollisionShape> {
        self.shapes.get(&position)
    }

    /// Diagnostic roll-up of the currently held shapes.
    pub fn summary(&self) -> CollisionSummary {
        let mut zones: Vec<ZoneSummary> = self
            .shapes
            .values()
            .map(|shape| {
                let mut min_height = f32::INFINITY;
                let mut max_height = f32::NEG_INFINITY;
                let mut hole_count = 0usize;
                for &h in shape.heights() {
                    if h.is_nan() {
                        hole_count += 1;
                    } else {
                        min_height = min_height.min(h);
                        max_height = max_height.max(h);
                    }
                }
                // All-hole zones have no finite extent.
                let (min_height, max_height) = if min_height <= max_height {
                    (min_height, max_height)
                } else {
                    (0.0, 0.0)
                };
                ZoneSummary {
                    position: shape.position,
                    min_height,
                    max_height,
                    hole_count,
                }
            })
            .collect();
        zones.sort_by_key(|z| (z.position.y, z.position.x));

        CollisionSummary {
            zones_size: self.zones_size,
            zone_count: zones.len(),
            zones,
        }
    }
}

impl HeightfieldSink for CollisionShapeSet {
    fn accept_heightfield(
        &mut self,
        _zone_index: usize,
        position: IVec2,
        heights: Vec<f32>,
    ) -> Result<(), TerrainError> {
        let expected = self.samples_per_zone();
        if heights.len() != expected {
            return Err(TerrainError::HeightfieldSizeMismatch {
                expected,
                actual: heights.len(),
            });
        }
        self.shapes.insert(position, CollisionShape { position, heights });
        Ok(())
    }
}

/// Serializable diagnostic summary of a shape set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionSummary {
    pub zones_size: u32,
    pub zone_count: usize,
    pub zones: Vec<ZoneSummary>,
}

/// Per-zone height extent and hole count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub position: IVec2,
    pub min_height: f32,
    pub max_height: f32,
    pub hole_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_and_query() {
        let mut shapes = CollisionShapeSet::new(2);
        shapes
            .accept_heightfield(0, IVec2::ZERO, vec![1.0, f32::NAN, 3.0, 4.0])
            .unwrap();

        let shape = shapes.shape_at(IVec2::ZERO).unwrap();
        assert!(shape.has_surface_at(0, 0, 2));
        assert!(!shape.has_surface_at(1, 0, 2), "hole pixel has no surface");
        assert!(shape.has_surface_at(0, 1, 2));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let mut shapes = CollisionShapeSet::new(4);
        let err = shapes
            .accept_heightfield(0, IVec2::ZERO, vec![0.0; 15])
            .unwrap_err();
        assert_eq!(
            err,
            TerrainError::HeightfieldSizeMismatch {
                expected: 16,
                actual: 15,
            }
        );
        assert!(shapes.is_empty(), "rejected array must not be stored");
    }

    #[test]
    fn test_delivery_supersedes_previous() {
        let mut shapes = CollisionShapeSet::new(2);
        shapes
            .accept_heightfield(0, IVec2::ZERO, vec![1.0; 4])
            .unwrap();
        shapes
            .accept_heightfield(0, IVec2::ZERO, vec![2.0; 4])
            .unwrap();

        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes.shape_at(IVec2::ZERO).unwrap().heights(), &[2.0; 4]);
    }

    #[test]
    fn test_summary_counts_holes_and_extent() {
        let mut shapes = CollisionShapeSet::new(2);
        shapes
            .accept_heightfield(0, IVec2::new(1, 0), vec![1.0, f32::NAN, -2.0, 4.0])
            .unwrap();

        let summary = shapes.summary();
        assert_eq!(summary.zone_count, 1);
        let zone = &summary.zones[0];
        assert_eq!(zone.position, IVec2::new(1, 0));
        assert_eq!(zone.min_height, -2.0);
        assert_eq!(zone.max_height, 4.0);
        assert_eq!(zone.hole_count, 1);

        // Summary serializes for diagnostics.
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("hole_count"));
    }
}
