//! Edge-pixel neighbor resolution.
//!
//! A zone's leftmost column duplicates the rightmost column of the
//! zone to its left, and its topmost row duplicates the bottom row of
//! the zone above, so collision seams align exactly across zones.

use glam::IVec2;

use crate::zones::ZoneGrid;

/// The zone and pixel that actually provide the sample for a given
/// local pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePixel {
    pub zone_index: usize,
    pub x: u32,
    pub y: u32,
}

/// Resolve the source for pixel `(x, y)` of the zone at `zone_index`.
///
/// Left-edge pixels read from the left neighbor's last column;
/// top-edge pixels read from the top neighbor's last row. At the
/// top-left corner the left neighbor wins and the top neighbor is
/// never consulted, even when the left neighbor is absent. That
/// asymmetry is load-bearing: changing it moves visible terrain
/// seams.
///
/// Pure over the grid snapshot; pixels with no neighbor resolve to
/// themselves.
pub fn resolve_source(grid: &ZoneGrid, zone_index: usize, x: u32, y: u32) -> SourcePixel {
    let position = grid.zones()[zone_index].position;
    let last = grid.zones_size() - 1;

    if x == 0 {
        if let Some(neighbor) = grid.zone_index_at(position + IVec2::NEG_X) {
            return SourcePixel {
                zone_index: neighbor,
                x: last,
                y,
            };
        }
    } else if y == 0 {
        if let Some(neighbor) = grid.zone_index_at(position + IVec2::NEG_Y) {
            return SourcePixel {
                zone_index: neighbor,
                x,
                y: last,
            };
        }
    }

    SourcePixel { zone_index, x, y }
}
