//! Core crate tests: config defaults and error formatting.

use glam::IVec2;

use crate::config::TerrainConfig;
use crate::constants::{DEFAULT_ZONES_SIZE, HOLE_SENTINEL};
use crate::error::TerrainError;

#[test]
fn test_default_config() {
    let config = TerrainConfig::default();
    assert_eq!(config.zones_size, DEFAULT_ZONES_SIZE);
    assert_eq!(config.height_map_factor, 1.0);
    assert_eq!(config.water_factor, 1.0);
    assert!(!config.create_collision_in_thread);
    assert!(!config.collision_only);
}

#[test]
fn test_samples_per_zone() {
    let config = TerrainConfig {
        zones_size: 4,
        ..Default::default()
    };
    assert_eq!(config.samples_per_zone(), 16);
}

#[test]
fn test_config_json_round_trip() {
    let config = TerrainConfig {
        zones_size: 64,
        height_map_factor: 10.0,
        water_factor: 2.0,
        create_collision_in_thread: true,
        collision_only: true,
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: TerrainConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_hole_sentinel_is_nan() {
    assert!(HOLE_SENTINEL.is_nan());
}

#[test]
fn test_error_display_names_zone() {
    let err = TerrainError::RasterSizeMismatch {
        zone: IVec2::new(2, -1),
        expected: 4,
        width: 3,
        height: 3,
    };
    let msg = err.to_string();
    assert!(msg.contains("(2, -1)"), "message should name the zone: {msg}");
    assert!(msg.contains("3×3"), "message should name the bad size: {msg}");
    assert!(msg.contains("4×4"), "message should name the expected size: {msg}");
}
