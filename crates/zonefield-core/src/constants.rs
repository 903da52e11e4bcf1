//! Pipeline constants and tuning parameters.

// --- Zones ---

/// Default zone edge length in samples. Every zone raster is square
/// with this many samples per side.
pub const DEFAULT_ZONES_SIZE: u32 = 256;

// --- Height derivation ---

/// Default scale applied to raw elevation samples (meters per unit).
pub const DEFAULT_HEIGHT_MAP_FACTOR: f32 = 1.0;

/// Default scale applied to water depth when lowering the collision
/// surface under water.
pub const DEFAULT_WATER_FACTOR: f32 = 1.0;

/// Marker emitted for pixels whose hole flag is set: "no physical
/// surface here". Downstream physics heightfields must treat this as
/// no collision, never as zero height.
pub const HOLE_SENTINEL: f32 = f32::NAN;

// --- Workers ---

/// Name given to collision generation worker threads.
pub const COLLISION_WORKER_THREAD_NAME: &str = "zonefield-collision-gen";
