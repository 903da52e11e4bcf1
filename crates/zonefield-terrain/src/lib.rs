//! Terrain zone system for ZONEFIELD.
//!
//! Zone raster storage, neighbor-aware heightfield stitching,
//! and the per-pass sample cache.

pub use zonefield_core as core;

pub mod builder;
pub mod neighbor;
pub mod raster;
pub mod sample_cache;
pub mod zones;

// Re-export key types for convenience.
pub use builder::{build_heightfields, BuildOutcome, ZoneHeightfield};
pub use raster::{Raster, RasterFormat, RasterImage, Texel};
pub use zones::{Zone, ZoneGrid};

#[cfg(test)]
mod tests;
