//! Error taxonomy for the terrain pipeline.
//!
//! Cancellation is deliberately not represented here: a cancelled
//! generation pass is a normal outcome of rapid successive update
//! requests, not a failure.

use std::fmt;

use glam::IVec2;

/// Failures surfaced by the heightfield pipeline.
///
/// Malformed zone data fails the whole pass rather than truncating:
/// partial or garbled collision geometry is worse than none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerrainError {
    /// A zone raster's dimensions do not match the configured zone size.
    RasterSizeMismatch {
        zone: IVec2,
        expected: u32,
        width: u32,
        height: u32,
    },
    /// A raster image's byte payload does not match its declared
    /// dimensions and format.
    MalformedRaster {
        zone: IVec2,
        expected_bytes: usize,
        actual_bytes: usize,
    },
    /// A delivered heightfield's length does not match the collision
    /// shape's declared sample count.
    HeightfieldSizeMismatch { expected: usize, actual: usize },
    /// A zone index referenced a zone missing from the snapshot.
    MissingZone { index: usize },
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainError::RasterSizeMismatch {
                zone,
                expected,
                width,
                height,
            } => write!(
                f,
                "zone ({}, {}) raster is {width}×{height}, expected {expected}×{expected}",
                zone.x, zone.y
            ),
            TerrainError::MalformedRaster {
                zone,
                expected_bytes,
                actual_bytes,
            } => write!(
                f,
                "zone ({}, {}) raster payload is {actual_bytes} bytes, expected {expected_bytes}",
                zone.x, zone.y
            ),
            TerrainError::HeightfieldSizeMismatch { expected, actual } => write!(
                f,
                "heightfield has {actual} samples, collision shape expects {expected}"
            ),
            TerrainError::MissingZone { index } => {
                write!(f, "zone index {index} is not present in the snapshot")
            }
        }
    }
}

impl std::error::Error for TerrainError {}
